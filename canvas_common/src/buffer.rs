// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A resizable two-dimensional pixel buffer.

use crate::resample::{self, Element, Interpolation};
use log::{debug, trace};

/// The largest supported width or height of a buffer, in pixels.
pub const MAX_DIMENSION: u32 = 8192;

/// How [`PixelBuffer::resize`] treats the requested size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Use the requested size.
    #[default]
    Replace,
    /// Only grow: each dimension becomes the larger of the current and the requested one.
    SizeOnlyToFit,
    /// Never become smaller than the size the buffer was created with.
    NotLessThanOriginal,
}

/// The parameters of a resize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeCommand {
    /// How the requested size is adjusted.
    pub policy: ResizePolicy,
    /// Rescale the existing content into the new size.
    ///
    /// Only honoured for pixel element types; otherwise, and when this is `None`, the
    /// overlapping top-left region is kept and new pixels are zeroed.
    pub content: Option<Interpolation>,
}

impl ResizeCommand {
    /// Resize with the given policy, keeping content in place.
    pub fn with_policy(policy: ResizePolicy) -> Self {
        Self {
            policy,
            content: None,
        }
    }

    /// Replace the size and rescale the content with `interpolation`.
    pub fn scale_content(interpolation: Interpolation) -> Self {
        Self {
            policy: ResizePolicy::Replace,
            content: Some(interpolation),
        }
    }
}

/// A two-dimensional buffer of `T`, in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer<T> {
    width: u32,
    height: u32,
    /// The size the buffer was created with.
    original: (u32, u32),
    data: Vec<T>,
}

impl<T: Element> PixelBuffer<T> {
    /// Create a new buffer filled with `T::default()`.
    ///
    /// Dimensions larger than [`MAX_DIMENSION`] are clamped.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = clamp_size(width, height);
        Self {
            width,
            height,
            original: (width, height),
            data: vec![T::default(); width as usize * height as usize],
        }
    }

    /// Create a new buffer from existing data, in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not of length `width * height` or if a dimension exceeds
    /// [`MAX_DIMENSION`].
    pub fn from_parts(data: Vec<T>, width: u32, height: u32) -> Self {
        assert!(
            width <= MAX_DIMENSION && height <= MAX_DIMENSION,
            "The buffer is too big. Its width and height can be no larger than {MAX_DIMENSION} pixels."
        );
        assert_eq!(
            data.len(),
            width as usize * height as usize,
            "Expected `data` to have length of exactly `width * height`"
        );

        Self {
            width,
            height,
            original: (width, height),
            data,
        }
    }

    /// The width of the buffer.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The height of the buffer.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The width and height of the buffer.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The size the buffer was created with.
    pub fn original_size(&self) -> (u32, u32) {
        self.original
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The elements in row-major order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// The elements in row-major order.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// One row of the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of bounds.
    pub fn row(&self, y: u32) -> &[T] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// One row of the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of bounds.
    pub fn row_mut(&mut self, y: u32) -> &mut [T] {
        let start = y as usize * self.width as usize;
        &mut self.data[start..start + self.width as usize]
    }

    /// The element at `(x, y)`, if it is in bounds.
    #[inline(always)]
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Set the element at `(x, y)`. Out-of-bounds writes are ignored.
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, value: T) {
        if x < self.width && y < self.height {
            self.data[y as usize * self.width as usize + x as usize] = value;
        }
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Reset the given sub-rectangle to `T::default()`, leaving the rest untouched.
    ///
    /// The rectangle is clipped to the buffer.
    pub fn clear(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let x0 = x.clamp(0, self.width as i32) as usize;
        let y0 = y.clamp(0, self.height as i32) as u32;
        let x1 = x.saturating_add(width.max(0)).clamp(0, self.width as i32) as usize;
        let y1 = y.saturating_add(height.max(0)).clamp(0, self.height as i32) as u32;

        if x0 >= x1 {
            return;
        }

        for row in y0..y1 {
            self.row_mut(row)[x0..x1].fill(T::default());
        }
    }

    /// Change the size with the default command.
    pub fn set_size(&mut self, width: u32, height: u32) -> bool {
        self.resize(width, height, ResizeCommand::default())
    }

    /// Resize the buffer, returning whether its size changed.
    ///
    /// Requests for the current size or for `0 × 0` are ignored, dimensions beyond
    /// [`MAX_DIMENSION`] are clamped.
    pub fn resize(&mut self, width: u32, height: u32, command: ResizeCommand) -> bool {
        if (width, height) == (0, 0) || (width, height) == self.size() {
            return false;
        }

        let (mut width, mut height) = clamp_size(width, height);
        match command.policy {
            ResizePolicy::Replace => {}
            ResizePolicy::SizeOnlyToFit => {
                width = width.max(self.width);
                height = height.max(self.height);
            }
            ResizePolicy::NotLessThanOriginal => {
                width = width.max(self.original.0);
                height = height.max(self.original.1);
            }
        }

        if (width, height) == self.size() {
            return false;
        }

        self.data = match command.content {
            Some(interpolation) if T::IS_PIXEL => resample::scale(
                interpolation,
                &self.data,
                self.width,
                self.height,
                width,
                height,
            ),
            _ => self.copy_overlap(width, height),
        };
        trace!(
            "resized buffer from {}x{} to {width}x{height}",
            self.width,
            self.height
        );
        self.width = width;
        self.height = height;

        true
    }

    /// Copy the top-left region overlapping a `width × height` buffer into a new allocation.
    fn copy_overlap(&self, width: u32, height: u32) -> Vec<T> {
        let mut data = vec![T::default(); width as usize * height as usize];
        let copy_width = self.width.min(width) as usize;

        for y in 0..self.height.min(height) {
            let dst = y as usize * width as usize;
            data[dst..dst + copy_width].copy_from_slice(&self.row(y)[..copy_width]);
        }

        data
    }

    /// Borrow the raw storage for native interop.
    ///
    /// The pointers handed out by the returned guard stay valid for as long as the guard
    /// lives; the buffer cannot be resized or dropped in the meantime.
    pub fn handle(&mut self) -> Handle<'_, T> {
        trace!("handing out raw buffer of {}x{}", self.width, self.height);
        Handle { buffer: self }
    }
}

impl<T: Element + bytemuck::Pod> PixelBuffer<T> {
    /// The elements as raw bytes, in row-major order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Scoped access to the raw storage of a [`PixelBuffer`].
#[derive(Debug)]
pub struct Handle<'a, T: Element> {
    buffer: &'a mut PixelBuffer<T>,
}

impl<T: Element> Handle<'_, T> {
    /// A pointer to the first element.
    pub fn as_ptr(&self) -> *const T {
        self.buffer.data.as_ptr()
    }

    /// A mutable pointer to the first element.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.data.as_mut_ptr()
    }

    /// The number of elements behind the pointer.
    pub fn len(&self) -> usize {
        self.buffer.data.len()
    }

    /// Whether there are no elements behind the pointer.
    pub fn is_empty(&self) -> bool {
        self.buffer.data.is_empty()
    }

    /// The width and height of the buffer.
    pub fn size(&self) -> (u32, u32) {
        self.buffer.size()
    }
}

impl<T: Element> Drop for Handle<'_, T> {
    fn drop(&mut self) {
        trace!("raw buffer released");
    }
}

fn clamp_size(width: u32, height: u32) -> (u32, u32) {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        debug!("clamping buffer size {width}x{height} to at most {MAX_DIMENSION}");
    }

    (width.min(MAX_DIMENSION), height.min(MAX_DIMENSION))
}
