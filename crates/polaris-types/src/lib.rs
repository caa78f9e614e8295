pub mod rect;
pub mod types;

pub use rect::{Point, ScreenRect};
pub use types::{
    AppEvent, BubbleContent, Display, TranslateReply, TranslationUpdate, UiRequest,
};
