//! The base module contains the infrastructure shared by every stage of the `slox` front end.

pub mod source_file;

mod error;
#[doc(inline)]
pub use error::{Error, Result};

mod diagnostic;
pub use diagnostic::{CollectingHandler, Handler, PrintHandler, VoidHandler};

pub mod log;
