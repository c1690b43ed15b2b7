use crate::errors::ForwardError;

/// Two reusable working buffers whose roles alternate layer by layer.
///
/// `front` names the buffer currently holding the layer input; the other one
/// receives the layer output. Swapping roles flips the index, so a pass of any
/// depth touches exactly these two allocations.
#[derive(Debug, Default)]
pub struct ScratchBuffers {
    buffers: [Vec<f64>; 2],
    front: usize,
    allocations: usize,
}

impl ScratchBuffers {
    /// An empty pair; nothing is allocated until the first pass.
    pub fn new() -> ScratchBuffers {
        ScratchBuffers::default()
    }

    /// A pair already sized for `width` values each.
    pub fn with_width(width: usize) -> Result<ScratchBuffers, ForwardError> {
        let mut scratch = ScratchBuffers::new();
        scratch.ensure_width(width)?;
        Ok(scratch)
    }

    /// Number of values each buffer can hold without reallocating.
    pub fn width(&self) -> usize {
        self.buffers[0].len().min(self.buffers[1].len())
    }

    /// How many times either buffer has had to grow its storage.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Grows both buffers to at least `width` values and resets roles.
    pub(crate) fn ensure_width(&mut self, width: usize) -> Result<(), ForwardError> {
        for buf in self.buffers.iter_mut() {
            if buf.len() < width {
                let before = buf.capacity();
                buf.try_reserve_exact(width - buf.len())
                    .map_err(|_| ForwardError::AllocationFailure)?;
                if buf.capacity() != before {
                    self.allocations += 1;
                }
                buf.resize(width, 0.0);
            }
        }
        self.front = 0;
        Ok(())
    }

    /// The buffer currently playing the input role.
    pub(crate) fn input_mut(&mut self) -> &mut [f64] {
        &mut self.buffers[self.front]
    }

    /// `(input, output)` views for the current layer.
    pub(crate) fn split(&mut self) -> (&[f64], &mut [f64]) {
        let [a, b] = &mut self.buffers;
        if self.front == 0 {
            (a.as_slice(), b.as_mut_slice())
        } else {
            (b.as_slice(), a.as_mut_slice())
        }
    }

    /// The buffer currently playing the output role.
    pub(crate) fn output(&self) -> &[f64] {
        &self.buffers[1 - self.front]
    }

    /// The last output becomes the next input.
    pub(crate) fn swap(&mut self) {
        self.front = 1 - self.front;
    }
}
