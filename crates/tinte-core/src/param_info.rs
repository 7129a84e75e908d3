//! Parameter introspection for discoverable processor parameters.
//!
//! [`ParameterInfo`] lets a host enumerate, read, and write an effect's
//! parameters by index, and look them up by name. The name lookup is the
//! boundary where "the host notifies the core of a named-parameter change"
//! lands: a preset loader or parameter-tree listener resolves the name once
//! and calls [`ParameterInfo::set_param`].
//!
//! Parameters are described by [`ParamDescriptor`] records carrying display
//! metadata, ranges, and stable IDs for persistence.
//!
//! Fully `no_std`, no heap allocation.

/// Scaling curve for parameter normalization.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: more resolution at low values; for frequency and
///   time-constant parameters. Requires `min > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Linear mapping (default).
    #[default]
    Linear,
    /// Logarithmic mapping.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter —
/// it is part of the persistence contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (enum-like, integer values).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit type used to format a parameter value for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamUnit {
    /// Dimensionless value.
    #[default]
    None,
    /// Decibels.
    Decibels,
    /// Percent (0–100).
    Percent,
    /// Milliseconds.
    Milliseconds,
    /// Hertz.
    Hertz,
    /// Compression ratio (n:1).
    Ratio,
}

/// Describes a single parameter's metadata for display and validation.
///
/// `short_name` should be 8 characters or less for hardware displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Output Trim").
    pub name: &'static str,
    /// Short name for hardware displays, max 8 characters.
    pub short_name: &'static str,
    /// Unit type for formatting the value.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Default value.
    pub default: f32,
    /// Recommended increment for encoder-based control.
    pub step: f32,
    /// Stable numeric ID for persistence. `ParamId(0)` = unassigned.
    pub id: ParamId,
    /// Human-readable stable ID, convention `"effect_param"`.
    pub string_id: &'static str,
    /// Normalization curve.
    pub scale: ParamScale,
    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Dimensionless parameter with a custom range.
    pub const fn custom(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Gain parameter in decibels.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            unit: ParamUnit::Decibels,
            step: 0.5,
            ..Self::custom(name, short_name, min, max, default)
        }
    }

    /// Time parameter in milliseconds.
    pub const fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            unit: ParamUnit::Milliseconds,
            step: 1.0,
            ..Self::custom(name, short_name, min, max, default)
        }
    }

    /// Percent parameter (0–100).
    pub const fn percent(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            unit: ParamUnit::Percent,
            step: 1.0,
            ..Self::custom(name, short_name, 0.0, 100.0, default)
        }
    }

    /// Stepped enum-like parameter with integer values `0..=max`.
    pub const fn stepped(
        name: &'static str,
        short_name: &'static str,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            step: 1.0,
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
            ..Self::custom(name, short_name, 0.0, max, default)
        }
    }

    /// Sets the stable parameter ID and string ID (builder pattern).
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the unit (builder pattern).
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the normalization scale (builder pattern).
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Clamps a value to this parameter's valid range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Trait for processors that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index; the index must be stable
/// for the lifetime of the instance.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index` (0.0 if out of range).
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index`. Implementations clamp to the
    /// descriptor range; out-of-range indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive), matching both
    /// `name`, `short_name`, and `string_id`.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Set a parameter by name. Returns `true` if the name resolved.
    fn set_param_by_name(&mut self, name: &str, value: f32) -> bool {
        match self.find_param_by_name(name) {
            Some(index) => {
                self.set_param(index, value);
                true
            }
            None => false,
        }
    }
}
