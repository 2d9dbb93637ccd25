//! Storage buffer holding one frame's shape instances.

use super::shapes::ShapeInstance;

/// Smallest allocation, in instances.
const MIN_CAPACITY: usize = 64;

/// Capacity needed to hold `needed` instances, given `current`.
///
/// Unchanged while the frame fits; otherwise twice the request, so a
/// helix that keeps growing reallocates only a handful of times.
pub(crate) fn grown_capacity(current: usize, needed: usize) -> usize {
    if needed <= current {
        current
    } else {
        (needed * 2).max(MIN_CAPACITY)
    }
}

/// Growable `STORAGE | COPY_DST` buffer of [`ShapeInstance`]s. Never
/// shrinks.
pub(crate) struct InstanceBuffer {
    buffer: wgpu::Buffer,
    /// In instances, not bytes.
    capacity: usize,
}

impl InstanceBuffer {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        Self {
            buffer: Self::allocate(device, MIN_CAPACITY),
            capacity: MIN_CAPACITY,
        }
    }

    fn allocate(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shape Instance Buffer"),
            size: (capacity * size_of::<ShapeInstance>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload `instances` from offset 0.
    ///
    /// Returns `true` when the buffer was replaced, in which case bind
    /// groups referencing it must be rebuilt.
    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[ShapeInstance],
    ) -> bool {
        let capacity = grown_capacity(self.capacity, instances.len());
        let reallocated = capacity != self.capacity;
        if reallocated {
            self.buffer = Self::allocate(device, capacity);
            self.capacity = capacity;
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(instances));
        }
        reallocated
    }

    pub(crate) fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_helix_grows_once() {
        // 20 base pairs, four primitives each
        assert_eq!(grown_capacity(MIN_CAPACITY, 80), 160);
        assert_eq!(grown_capacity(160, 80), 160);
        assert_eq!(grown_capacity(MIN_CAPACITY, 64), MIN_CAPACITY);
    }

    #[test]
    fn growth_doubles_the_request() {
        assert_eq!(grown_capacity(160, 161), 322);
        assert_eq!(grown_capacity(322, 4000), 8000);
    }

    #[test]
    fn empty_frame_keeps_capacity() {
        assert_eq!(grown_capacity(MIN_CAPACITY, 0), MIN_CAPACITY);
    }

    #[test]
    fn capacity_never_shrinks() {
        let mut capacity = MIN_CAPACITY;
        for needed in [500, 10, 0, 499, 1001, 3] {
            let next = grown_capacity(capacity, needed);
            assert!(next >= capacity);
            assert!(next >= needed);
            capacity = next;
        }
    }
}
