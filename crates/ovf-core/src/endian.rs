//! Host byte-order detection and fixed-width scalar conversions.
//!
//! Pure value transforms with no I/O and no failure modes. The binary data
//! codecs are generic over [`EndianScalar`], which is what lets one
//! implementation serve both the 4-byte and 8-byte encodings.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order of a binary data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

/// Byte order of the host architecture, resolved at compile time.
pub const fn host_endianness() -> Endianness {
    if cfg!(target_endian = "big") {
        Endianness::Big
    } else {
        Endianness::Little
    }
}

/// True on big-endian hosts.
pub const fn is_big_endian() -> bool {
    matches!(host_endianness(), Endianness::Big)
}

/// Fixed-width floating-point scalar that can cross byte-order boundaries.
pub trait EndianScalar: Copy + PartialEq {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Reverse the byte order of the value.
    fn swap_bytes(self) -> Self;

    /// Decode one value from `buf[..WIDTH]` in the given byte order.
    fn from_bytes(buf: &[u8], order: Endianness) -> Self;

    /// Encode one value into `buf[..WIDTH]` in the given byte order.
    fn put_bytes(self, buf: &mut [u8], order: Endianness);

    /// Bulk-decode `raw` into `out`; `raw.len()` must equal `out.len() * WIDTH`.
    fn read_slice_into(raw: &[u8], order: Endianness, out: &mut [Self]);

    /// Bulk-encode `values` into `out`; `out.len()` must equal `values.len() * WIDTH`.
    fn write_slice_into(values: &[Self], order: Endianness, out: &mut [u8]);

    fn to_f64(self) -> f64;

    fn from_f64(value: f64) -> Self;
}

impl EndianScalar for f32 {
    const WIDTH: usize = 4;

    fn swap_bytes(self) -> Self {
        Self::from_bits(self.to_bits().swap_bytes())
    }

    fn from_bytes(buf: &[u8], order: Endianness) -> Self {
        match order {
            Endianness::Big => BigEndian::read_f32(buf),
            Endianness::Little => LittleEndian::read_f32(buf),
        }
    }

    fn put_bytes(self, buf: &mut [u8], order: Endianness) {
        match order {
            Endianness::Big => BigEndian::write_f32(buf, self),
            Endianness::Little => LittleEndian::write_f32(buf, self),
        }
    }

    fn read_slice_into(raw: &[u8], order: Endianness, out: &mut [Self]) {
        match order {
            Endianness::Big => BigEndian::read_f32_into(raw, out),
            Endianness::Little => LittleEndian::read_f32_into(raw, out),
        }
    }

    fn write_slice_into(values: &[Self], order: Endianness, out: &mut [u8]) {
        match order {
            Endianness::Big => BigEndian::write_f32_into(values, out),
            Endianness::Little => LittleEndian::write_f32_into(values, out),
        }
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl EndianScalar for f64 {
    const WIDTH: usize = 8;

    fn swap_bytes(self) -> Self {
        Self::from_bits(self.to_bits().swap_bytes())
    }

    fn from_bytes(buf: &[u8], order: Endianness) -> Self {
        match order {
            Endianness::Big => BigEndian::read_f64(buf),
            Endianness::Little => LittleEndian::read_f64(buf),
        }
    }

    fn put_bytes(self, buf: &mut [u8], order: Endianness) {
        match order {
            Endianness::Big => BigEndian::write_f64(buf, self),
            Endianness::Little => LittleEndian::write_f64(buf, self),
        }
    }

    fn read_slice_into(raw: &[u8], order: Endianness, out: &mut [Self]) {
        match order {
            Endianness::Big => BigEndian::read_f64_into(raw, out),
            Endianness::Little => LittleEndian::read_f64_into(raw, out),
        }
    }

    fn write_slice_into(values: &[Self], order: Endianness, out: &mut [u8]) {
        match order {
            Endianness::Big => BigEndian::write_f64_into(values, out),
            Endianness::Little => LittleEndian::write_f64_into(values, out),
        }
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Convert a host-order value to big-endian byte order.
pub fn to_big_endian<T: EndianScalar>(value: T) -> T {
    if is_big_endian() {
        value
    } else {
        value.swap_bytes()
    }
}

/// Convert a big-endian value to host byte order.
pub fn from_big_endian<T: EndianScalar>(value: T) -> T {
    to_big_endian(value)
}

/// Convert a host-order value to little-endian byte order.
pub fn to_little_endian<T: EndianScalar>(value: T) -> T {
    if is_big_endian() {
        value.swap_bytes()
    } else {
        value
    }
}

/// Convert a little-endian value to host byte order.
pub fn from_little_endian<T: EndianScalar>(value: T) -> T {
    to_little_endian(value)
}
