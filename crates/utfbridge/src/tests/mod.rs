mod arbitrary;
mod chunk_helpers;
pub(crate) mod utils;
