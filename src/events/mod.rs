//! # Events Module
//!
//! Progress reporting for the comparison run.
//!
//! The core library never prints. It emits events through a channel and the
//! CLI decides what goes to stdout (progress) and what goes to stderr
//! (warnings).
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Matrix(MatrixEvent::PairCompared(p)) = event {
//!             println!("{} vs {}: {:.3}", p.row_path.display(), p.column_path.display(), p.score);
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
