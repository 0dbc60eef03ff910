//! Yanzhi is a timed sequencing engine for an audio-synchronized desktop
//! animation.
//!
//! A show is a roster of frameless, always-on-top windows and a table of cues
//! keyed by playback position. Each position update from the media clock looks
//! up the single cue containing it and applies that cue's visible set and
//! command batch to the [`Stage`].
//!
//! # Pipeline overview
//!
//! 1. **Clock**: a [`PlaybackClock`] reports positions (or end of media).
//! 2. **Direct**: [`SequenceDirector`] maps the position onto a [`Cue`] and
//!    applies it. Dispatch is memoryless, so seeking is always safe.
//! 3. **Tick**: the [`Stage`] advances every visible window at the host tick
//!    rate: frame loops, jitter, shake, motion, fades.
//! 4. **Present**: a [`Presenter`] puts the stage on screen, or
//!    [`render_stage`] rasterizes it into an image.
//!
//! All geometry is authored against a 1920×1080 reference screen. A single
//! [`ScaleContext`] turns it into real screen pixels when windows are placed;
//! centered and edge-relative positions resolve against the real screen.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod config;
mod content;
mod foundation;
mod layout;
mod notify;
mod render;
mod runtime;
mod sequence;
mod show;
mod window;

pub use animation::ease::Ease;
pub use animation::jitter::{
    DEFAULT_JITTER_FREQUENCY_MS, Decoration, DecorationShape, JitterAnimator,
};
pub use animation::motion::{Lerp, Motion, MotionSample, Segment, Tween};
pub use animation::scheduler::{BASE_TICK_HZ, BASE_TICK_MS, DEFAULT_FPS, Dispatch, TickScheduler};
pub use animation::shake::{DEFAULT_SHAKE_INTERVAL_MS, DEFAULT_SHAKE_OFFSET, ShakeAnimator};
pub use animation::timer::PeriodicTimer;
pub use assets::frames::{
    DirFrameSource, FrameSet, FrameSource, KeyframeMap, METADATA_FILE, MemoryFrameSource,
    flat_frames,
};
pub use assets::text::{RichText, TextBrush, TextEngine, TextStyle, layout_extent, parse_markup};
pub use config::{
    DebugConfig, ENV_COUNT_TICKS, ENV_DEBUG, ENV_HIDE_TASKBAR, ENV_START_FROM, ENV_STOP_AT,
};
pub use content::Content;
pub use content::cycler::{DEFAULT_ROTATE_STEP_DEG, FrameCycler, PlaybackPolicy};
pub use content::label::{
    DEFAULT_FONT_SIZE, DecoratedLabel, FLOAT_FONT_SIZE, LabelStyle, TextAlign,
};
pub use foundation::color::{Rgba8, palette};
pub use foundation::core::{Affine, Point, ScreenPoint, ScreenSize, Vec2};
pub use foundation::error::{YanzhiError, YanzhiResult};
pub use layout::position::{
    AxisSpec, PositionSpec, Side, VERTICAL_CENTER_BIAS, resolve_position,
};
pub use layout::scale::{ScaleContext, TITLE_BAR_COMPENSATION, compute_scale};
pub use notify::{LogNotifier, MemoryNotifier, Notifier};
pub use render::composite::{PremulRgba8, over, premultiply, unpremultiply};
pub use render::snapshot::{DESKTOP, decoration_paths, font_data, render_stage, render_window};
pub use runtime::{Runtime, StepOutcome};
pub use sequence::clock::{ManualClock, PlaybackClock, PlaybackEvent, WallClock};
pub use sequence::cue::{Command, Cue, TimeRange};
pub use sequence::director::{EXIT_GRACE_MS, SequenceDirector};
pub use sequence::timeline::Timeline;
pub use show::dsl::{
    CueBuilder, ShowBuilder, fancy_left, float_label_window, frames_window, hanging_window,
    label_window, load, move_to, notify, set_text, start_loop, start_loop_with, start_shake,
    stop_loop, stop_shake, zoom_window,
};
pub use show::model::{ContentDef, LabelDef, Show, WindowDef};
pub use show::yanzhi::{DURATION_MS as YANZHI_DURATION_MS, yanzhi_show};
pub use window::container::{
    ContainerWindow, DEFAULT_RESOURCE, EMPTY_RESOURCE, FANCY_LEFT_LEG_MS, FANCY_LEFT_NUDGE,
    LABEL_PADDING, Placement,
};
pub use window::effects::{
    ROPE_ANCHOR_Y, ROPE_INSET, ROPE_LIFT, ROPE_WIDTH, ZOOM_EASE, ZOOM_FADE_IN_EASE,
    ZOOM_FADE_OUT_EASE, ZOOM_FROM, ZoomIn, rope_lines,
};
pub use window::present::{LogPresenter, Presenter};
pub use window::stage::Stage;
