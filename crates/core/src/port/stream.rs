// Stream Port - bidirectional byte stream

use std::io::{Read, Write};

/// Byte-stream capability
///
/// Every handle is readable and writable; the role (input vs output) is a
/// convention of the Environment field it is bound to. Drains expect FIFO
/// behavior (writes append, reads consume from the front), as provided by
/// `MemoryStream` in infra-memory or a plain `VecDeque<u8>`. A
/// `Cursor<Vec<u8>>` is not FIFO: after a write its position sits past the
/// written bytes.
pub trait Stream: Read + Write + Send {}

impl<T: Read + Write + Send> Stream for T {}
