// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
#![allow(deprecated)]

use error_chain::error_chain;

error_chain! {
    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {} x {}: rows and columns must both be positive \
                     and their product must fit in memory", rows, columns)
        }
        UnknownEvent(name: String) {
            description("unknown maze event name")
            display("unknown maze event name '{}', expected one of enter, discover, push, reveal",
                    name)
        }
    }
}
