//! Problem codes for the nocap compiler. The enumeration is generated from
//! `resources/problem-codes.csv` at build time.

include!(concat!(env!("OUT_DIR"), "/problems.rs"));
