//! Drawing side of the aura panel
//!
//! Everything here renders through the [`Surface`] trait, the boundary to
//! the host's immediate-mode drawing backend. The crate adds no windowing
//! or rasterization of its own; `tiny_skia::Color` is used purely as the
//! color vocabulary shared with the backend.

pub mod chips;
pub mod panel;
pub mod surface;
pub mod text;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_util;

pub use chips::{arrange, chip_color, draw as draw_chips, measure_height};
pub use panel::{AuraPanel, FrameInput};
pub use surface::{Corners, Surface, draw_text_glowed};
pub use text::ellipsize_to_width;
