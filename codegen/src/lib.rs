//! Code generation for nocap.
//!
//! The parser produces C directly as it recognizes each rule, so this crate
//! only provides the sink that the text is written into. The generated
//! translation unit has the shape:
//!
//! ```c
//! #include <stdio.h>
//! int main(void) {
//! float x;
//! x = 3+4*2;
//! printf("%.2f\n", (float)(x));
//! return 0;
//! }
//! ```

mod emit;

pub use emit::Emitter;
