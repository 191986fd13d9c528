pub mod align;
pub mod capture;
pub mod engine;
pub mod handle;
pub mod input;
pub mod map;
pub mod shortcuts;
pub mod sync;
pub mod tools;

pub use capture::{CaptureLease, NoCapture, PointerCapture};
pub use handle::{BulkAddError, BulkAddRequest, CommandQueue, DeskCommand, DeskCommands};
pub use input::{InputEvent, Modifiers};
pub use map::{Cursor, DeleteRequest, DeskMap, Response};
pub use sync::{
    BatchCoordinateUpdate, CoordinateSync, CoordinateUpdate, PositionChange, SyncError,
    SyncOutbox, SyncOutcome, classify_response,
};
