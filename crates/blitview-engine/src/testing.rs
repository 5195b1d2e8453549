//! Recording fakes of the view backend traits.
//!
//! Everything is single-threaded (`Rc<RefCell<_>>`), like the runtime that
//! drives the real backend.

use std::cell::RefCell;
use std::rc::Rc;

use image::RgbaImage;
use winit::dpi::PhysicalSize;

use crate::view::{
    check_texture_size, BlitRegion, CommandQueue, Drawable, DrawableSource, RenderDevice,
    TextureExtent, ViewError,
};

/// One recorded `blit_and_present` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedBlit {
    pub texture_id: u64,
    pub drawable_id: u64,
    pub region: BlitRegion,
    pub presented: bool,
}

#[derive(Debug, Default)]
struct Recorder {
    next_id: u64,
    textures_created: usize,
    queues_created: usize,
    blits: Vec<RecordedBlit>,
}

impl Recorder {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory device. Clones share one recorder.
#[derive(Debug, Clone)]
pub struct FakeDevice {
    recorder: Rc<RefCell<Recorder>>,
    max_dimension: u32,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::with_max_dimension(8192)
    }

    /// A device whose 2D textures cannot exceed `max` texels per side.
    pub fn with_max_dimension(max: u32) -> Self {
        Self {
            recorder: Rc::new(RefCell::new(Recorder::default())),
            max_dimension: max,
        }
    }

    pub fn textures_created(&self) -> usize {
        self.recorder.borrow().textures_created
    }

    pub fn queues_created(&self) -> usize {
        self.recorder.borrow().queues_created
    }

    /// Number of command submissions across all queues of this device.
    pub fn submissions(&self) -> usize {
        self.recorder.borrow().blits.len()
    }

    pub fn blits(&self) -> Vec<RecordedBlit> {
        self.recorder.borrow().blits.clone()
    }
}

impl Default for FakeDevice {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct FakeTexture {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub pixels: RgbaImage,
}

impl TextureExtent for FakeTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn depth(&self) -> u32 {
        self.depth
    }
}

#[derive(Debug)]
pub struct FakeQueue {
    recorder: Rc<RefCell<Recorder>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeDrawable {
    pub id: u64,
    pub size: PhysicalSize<u32>,
}

impl Drawable for FakeDrawable {
    fn size(&self) -> PhysicalSize<u32> {
        self.size
    }
}

impl RenderDevice for FakeDevice {
    type Texture = FakeTexture;
    type Queue = FakeQueue;

    fn new_command_queue(&self) -> FakeQueue {
        self.recorder.borrow_mut().queues_created += 1;
        FakeQueue { recorder: self.recorder.clone() }
    }

    fn new_texture(&self, image: &RgbaImage) -> Result<FakeTexture, ViewError> {
        check_texture_size(image.width(), image.height(), self.max_dimension)?;

        let mut rec = self.recorder.borrow_mut();
        rec.textures_created += 1;
        Ok(FakeTexture {
            id: rec.next_id(),
            width: image.width(),
            height: image.height(),
            depth: 1,
            pixels: image.clone(),
        })
    }
}

impl CommandQueue for FakeQueue {
    type Texture = FakeTexture;
    type Drawable = FakeDrawable;

    fn blit_and_present(&self, source: &FakeTexture, drawable: FakeDrawable, region: BlitRegion) {
        self.recorder.borrow_mut().blits.push(RecordedBlit {
            texture_id: source.id,
            drawable_id: drawable.id,
            region,
            presented: true,
        });
    }
}

/// Drawable source that records every request.
#[derive(Debug, Default)]
pub struct FakeDrawables {
    /// Sizes requested by the view, in order.
    pub requests: Vec<PhysicalSize<u32>>,
    available: bool,
    fixed_size: Option<PhysicalSize<u32>>,
    next_id: u64,
}

impl FakeDrawables {
    /// Hands out drawables of whatever size is requested.
    pub fn available() -> Self {
        Self { available: true, ..Self::default() }
    }

    /// Never has a drawable.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Hands out drawables of one size regardless of the request.
    pub fn fixed(size: PhysicalSize<u32>) -> Self {
        Self {
            available: true,
            fixed_size: Some(size),
            ..Self::default()
        }
    }
}

impl DrawableSource for FakeDrawables {
    type Drawable = FakeDrawable;

    fn current_drawable(&mut self, size: PhysicalSize<u32>) -> Option<FakeDrawable> {
        self.requests.push(size);
        if !self.available {
            return None;
        }
        self.next_id += 1;
        Some(FakeDrawable {
            id: self.next_id,
            size: self.fixed_size.unwrap_or(size),
        })
    }
}
