pub mod acquire;
pub mod symbology;

pub use acquire::{
    decode_image, live_decode, manual_entry, AcquireError, DecodedSymbol, FrameSource,
    SymbolDecoder,
};
pub use symbology::{Symbology, SymbologyError};
