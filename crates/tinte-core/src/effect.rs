//! Core Effect trait and chaining combinator.
//!
//! The [`Effect`] trait is the seam between the signal engines and their
//! host collaborator (file processor, plugin wrapper, test harness). All
//! methods are designed to be called from a real-time render callback:
//! no allocation, no locking, no logging.
//!
//! ## Design Decisions
//!
//! - **Object-safe**: `dyn Effect` works for runtime chains; generics are
//!   preferred where performance matters.
//! - **Stereo as a first-class path**: linked-dynamics and mid/side
//!   processors cannot be expressed as two independent mono passes, so
//!   [`process_stereo`](Effect::process_stereo) is part of the trait with a
//!   dual-mono default.

/// Core trait for all audio processors.
pub trait Effect {
    /// Process a single mono sample.
    ///
    /// Advances internal state by one sample. Input is nominally in
    /// `[-1.0, 1.0]` but no range is enforced.
    fn process(&mut self, input: f32) -> f32;

    /// Process one stereo frame.
    ///
    /// Default implementation runs both channels through [`process`]
    /// (dual mono). Processors with cross-channel state (linked detectors,
    /// mid/side) must override this.
    ///
    /// [`process`]: Effect::process
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        (self.process(left), self.process(right))
    }

    /// Process a block of mono samples.
    ///
    /// Default implementation calls [`process`](Effect::process) per sample;
    /// override for hoisted-coefficient block loops.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a stereo block, reading from the input slices and writing to
    /// the output slices. All four slices must have equal length.
    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        debug_assert_eq!(left_in.len(), right_in.len());
        debug_assert_eq!(left_in.len(), left_out.len());
        debug_assert_eq!(left_out.len(), right_out.len());
        for i in 0..left_in.len() {
            let (l, r) = self.process_stereo(left_in[i], right_in[i]);
            left_out[i] = l;
            right_out[i] = r;
        }
    }

    /// Update the sample rate.
    ///
    /// Recalculates sample-rate-dependent coefficients. Does not clear
    /// signal state; call [`reset`](Effect::reset) separately if silence
    /// is desired.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal signal state (filter memory, envelopes) without
    /// changing parameters. Called on transport stop or prepare-to-play.
    fn reset(&mut self);

    /// Report processing latency in samples. Zero for every tinte engine.
    fn latency_samples(&self) -> usize {
        0
    }
}

/// Extension trait for chaining effects with static dispatch.
pub trait EffectExt: Effect + Sized {
    /// Chain this effect with another; `self` feeds into `next`.
    fn chain<E: Effect>(self, next: E) -> Chain<Self, E> {
        Chain {
            first: self,
            second: next,
        }
    }
}

impl<T: Effect> EffectExt for T {}

/// Two effects chained in series, created by [`EffectExt::chain`].
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: Effect, B: Effect> Effect for Chain<A, B> {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let mid = self.first.process(input);
        self.second.process(mid)
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let (l, r) = self.first.process_stereo(left, right);
        self.second.process_stereo(l, r)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.first.set_sample_rate(sample_rate);
        self.second.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }

    fn latency_samples(&self) -> usize {
        self.first.latency_samples() + self.second.latency_samples()
    }
}

impl<A, B> Chain<A, B> {
    /// Reference to the first effect in the chain.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Mutable reference to the first effect in the chain.
    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    /// Reference to the second effect in the chain.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Mutable reference to the second effect in the chain.
    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }
}
