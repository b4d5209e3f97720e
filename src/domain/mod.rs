pub mod email;
pub use email::{from_slice_to_addrs, parse_addrs, Addr, Addrs, Email, Envelope};
