//! Terminal presentation layer.
//!
//! A small, game-oriented rendering layer: frames are drawn into a framebuffer
//! through the [`Renderer`] capability and then flushed to the terminal as
//! diffs. No widget toolkit is involved.
//!
//! - [`render`]: the `Renderer` trait and per-frame draw order
//! - [`game_view`]: layout and the framebuffer renderer
//! - [`effects`]: event-driven banners
//! - [`renderer`]: crossterm terminal setup and flushing

pub mod effects;
pub mod fb;
pub mod game_view;
pub mod render;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use effects::Effects;
pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{piece_color, AnchorY, FrameRenderer, GameView, Viewport};
pub use render::{overlay_for, render_frame, Overlay, PieceStyle, Renderer};
pub use renderer::{encode_diff_into, encode_full_into, Terminal};
