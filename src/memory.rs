//! Bounds-checked loads and stores
//!
//! Vectors move to and from three kinds of linear memory:
//!
//! - slices of the element type (`from_array` / `into_array`), with optional
//!   index maps turning the transfer into a gather or scatter
//! - raw bytes with an explicit [`ByteOrder`] (`from_bytes` / `into_bytes`)
//! - slices of a different element type that converts losslessly
//!   (`u16` code units for `int16` lanes, `bool` for `int8` lanes)
//!
//! # Bounds contract
//!
//! An unmasked contiguous access fails iff the range it covers is not inside
//! the region. A masked or indexed access checks each active lane's own
//! element position; inactive lanes are never checked and load as zero. A
//! failing access has no effect: every position is validated before the
//! first lane is written. Scatters write lanes in increasing lane order, so
//! the highest lane wins when two lanes share a destination.

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Element, LaneError, Mask, Result, Species, Vector};

/// Byte order of lanes in a byte region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the target platform
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        Self::native()
    }
}

/// Byte buffer that may be read-only
///
/// Stores into a [`ByteRegion::ReadOnly`] fail with
/// [`LaneError::ReadOnlyTarget`] before any bounds check.
#[derive(Debug)]
pub enum ByteRegion<'a> {
    ReadOnly(&'a [u8]),
    Writable(&'a mut [u8]),
}

impl ByteRegion<'_> {
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, ByteRegion::ReadOnly(_))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ByteRegion::ReadOnly(bytes) => bytes,
            ByteRegion::Writable(bytes) => bytes,
        }
    }
}

impl<'a> From<&'a [u8]> for ByteRegion<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ByteRegion::ReadOnly(bytes)
    }
}

impl<'a> From<&'a mut [u8]> for ByteRegion<'a> {
    fn from(bytes: &'a mut [u8]) -> Self {
        ByteRegion::Writable(bytes)
    }
}

/// Start index of `[offset, offset + size)` if it lies in `[0, length)`
pub(crate) fn check_range(offset: isize, size: usize, length: usize) -> Result<usize> {
    let start = usize::try_from(offset).ok();
    match start.and_then(|s| s.checked_add(size)) {
        Some(end) if end <= length => Ok(end - size),
        _ => Err(LaneError::out_of_bounds(offset as i64, size, length)),
    }
}

/// Which lanes take part in a transfer and where they sit in memory
///
/// Lane `i` covers `[offset + k * width, offset + (k + 1) * width)` where `k`
/// is `map[i]` for indexed access and `i` otherwise.
struct Access<'m> {
    offset: isize,
    width: usize,
    map: Option<&'m [isize]>,
    mask: Option<&'m [bool]>,
}

impl<'m> Access<'m> {
    fn contiguous(offset: isize, width: usize) -> Self {
        Self {
            offset,
            width,
            map: None,
            mask: None,
        }
    }

    fn masked(mut self, mask: &'m [bool]) -> Self {
        self.mask = Some(mask);
        self
    }

    fn indexed(mut self, map: &'m [isize]) -> Self {
        self.map = Some(map);
        self
    }

    /// Start position of every active lane, `None` for inactive lanes
    fn positions(&self, lanes: usize, length: usize) -> Result<Vec<Option<usize>>> {
        if self.map.is_none() && self.mask.is_none() {
            let start = check_range(self.offset, lanes * self.width, length)?;
            return Ok((0..lanes).map(|i| Some(start + i * self.width)).collect());
        }
        (0..lanes)
            .map(|i| {
                if !self.mask.map_or(true, |m| m[i]) {
                    return Ok(None);
                }
                let k = self.map.map_or(i as isize, |m| m[i]);
                let position = k
                    .checked_mul(self.width as isize)
                    .and_then(|d| self.offset.checked_add(d))
                    .unwrap_or(isize::MAX);
                check_range(position, self.width, length).map(Some)
            })
            .collect()
    }
}

/// `map_offset..map_offset + lanes` of an index map
fn index_window(index_map: &[isize], map_offset: usize, lanes: usize) -> Result<&[isize]> {
    let start = check_range(map_offset as isize, lanes, index_map.len())?;
    Ok(&index_map[start..start + lanes])
}

fn load<E, T, F>(species: Species<E>, src: &[T], access: &Access<'_>, f: F) -> Result<Vector<E>>
where
    E: Element,
    T: Copy,
    F: Fn(T) -> E,
{
    let positions = access.positions(species.length(), src.len())?;
    let lanes = positions
        .into_iter()
        .map(|p| p.map_or(E::ZERO, |p| f(src[p])))
        .collect();
    Ok(Vector::from_parts(species, lanes))
}

fn store<E, T, F>(v: &Vector<E>, dst: &mut [T], access: &Access<'_>, f: F) -> Result<()>
where
    E: Element,
    F: Fn(E) -> T,
{
    let positions = access.positions(v.length(), dst.len())?;
    for (lane, position) in v.as_slice().iter().zip(positions) {
        if let Some(p) = position {
            dst[p] = f(*lane);
        }
    }
    Ok(())
}

fn load_bytes<E: Element>(
    species: Species<E>,
    src: &[u8],
    access: &Access<'_>,
    order: ByteOrder,
) -> Result<Vector<E>> {
    let width = species.element_size();
    let positions = access.positions(species.length(), src.len())?;
    let lanes = positions
        .into_iter()
        .map(|p| p.map_or(E::ZERO, |p| E::read_bytes(&src[p..p + width], order)))
        .collect();
    Ok(Vector::from_parts(species, lanes))
}

fn store_bytes<E: Element>(
    v: &Vector<E>,
    target: &mut ByteRegion<'_>,
    access: &Access<'_>,
    order: ByteOrder,
) -> Result<()> {
    let dst = match target {
        ByteRegion::ReadOnly(_) => return Err(LaneError::ReadOnlyTarget),
        ByteRegion::Writable(bytes) => bytes,
    };
    let width = v.species().element_size();
    let positions = access.positions(v.length(), dst.len())?;
    for (lane, position) in v.as_slice().iter().zip(positions) {
        if let Some(p) = position {
            lane.write_bytes(&mut dst[p..p + width], order);
        }
    }
    Ok(())
}

impl<E: Element> Vector<E> {
    /// Load `species.length()` lanes from `src[offset..]`
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfBounds`] unless
    /// `[offset, offset + N)` lies inside `src`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trueno_lanes::{Shape, Species, Vector};
    ///
    /// let species = Species::<i32>::new(Shape::S128).unwrap();
    /// let data = [1, 2, 3, 4, 5, 6];
    /// let v = Vector::from_array(species, &data, 2).unwrap();
    /// assert_eq!(v.as_slice(), &[3, 4, 5, 6]);
    /// assert!(Vector::from_array(species, &data, 3).is_err());
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = species.length(), offset = offset as i64)))]
    pub fn from_array(species: Species<E>, src: &[E], offset: isize) -> Result<Self> {
        load(species, src, &Access::contiguous(offset, 1), |x| x)
    }

    /// Load the lanes set in `mask`; other lanes are zero and unchecked
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = species.length(), offset = offset as i64)))]
    pub fn from_array_masked(
        species: Species<E>,
        src: &[E],
        offset: isize,
        mask: &Mask<E>,
    ) -> Result<Self> {
        species.check(&mask.species())?;
        let access = Access::contiguous(offset, 1).masked(mask.as_slice());
        load(species, src, &access, |x| x)
    }

    /// Gather lane `i` from `src[offset + index_map[map_offset + i]]`
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = species.length(), offset = offset as i64)))]
    pub fn from_array_indexed(
        species: Species<E>,
        src: &[E],
        offset: isize,
        index_map: &[isize],
        map_offset: usize,
    ) -> Result<Self> {
        let map = index_window(index_map, map_offset, species.length())?;
        load(species, src, &Access::contiguous(offset, 1).indexed(map), |x| x)
    }

    /// Gather the lanes set in `mask`; other lanes are zero and unchecked
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = species.length(), offset = offset as i64)))]
    pub fn from_array_indexed_masked(
        species: Species<E>,
        src: &[E],
        offset: isize,
        index_map: &[isize],
        map_offset: usize,
        mask: &Mask<E>,
    ) -> Result<Self> {
        species.check(&mask.species())?;
        let map = index_window(index_map, map_offset, species.length())?;
        let access = Access::contiguous(offset, 1)
            .indexed(map)
            .masked(mask.as_slice());
        load(species, src, &access, |x| x)
    }

    /// Store all lanes to `dst[offset..offset + N]`
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = self.length(), offset = offset as i64)))]
    pub fn into_array(&self, dst: &mut [E], offset: isize) -> Result<()> {
        store(self, dst, &Access::contiguous(offset, 1), |x| x)
    }

    /// Store the lanes set in `mask`; other positions are left untouched
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = self.length(), offset = offset as i64)))]
    pub fn into_array_masked(&self, dst: &mut [E], offset: isize, mask: &Mask<E>) -> Result<()> {
        self.check_mask(mask)?;
        let access = Access::contiguous(offset, 1).masked(mask.as_slice());
        store(self, dst, &access, |x| x)
    }

    /// Scatter lane `i` to `dst[offset + index_map[map_offset + i]]`
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = self.length(), offset = offset as i64)))]
    pub fn into_array_indexed(
        &self,
        dst: &mut [E],
        offset: isize,
        index_map: &[isize],
        map_offset: usize,
    ) -> Result<()> {
        let map = index_window(index_map, map_offset, self.length())?;
        store(self, dst, &Access::contiguous(offset, 1).indexed(map), |x| x)
    }

    /// Scatter the lanes set in `mask`
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = self.length(), offset = offset as i64)))]
    pub fn into_array_indexed_masked(
        &self,
        dst: &mut [E],
        offset: isize,
        index_map: &[isize],
        map_offset: usize,
        mask: &Mask<E>,
    ) -> Result<()> {
        self.check_mask(mask)?;
        let map = index_window(index_map, map_offset, self.length())?;
        let access = Access::contiguous(offset, 1)
            .indexed(map)
            .masked(mask.as_slice());
        store(self, dst, &access, |x| x)
    }

    /// Decode lanes from `src[byte_offset..byte_offset + vector_byte_size()]`
    ///
    /// # Examples
    ///
    /// ```
    /// use trueno_lanes::{ByteOrder, Shape, Species, Vector};
    ///
    /// let species = Species::<i16>::new(Shape::S64).unwrap();
    /// let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
    /// let v = Vector::from_bytes(species, &bytes, 0, ByteOrder::BigEndian).unwrap();
    /// assert_eq!(v.as_slice(), &[0x0102, 0x0304, 0x0506, 0x0708]);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = species.length(), byte_offset = byte_offset as i64)))]
    pub fn from_bytes(
        species: Species<E>,
        src: &[u8],
        byte_offset: isize,
        order: ByteOrder,
    ) -> Result<Self> {
        let access = Access::contiguous(byte_offset, species.element_size());
        load_bytes(species, src, &access, order)
    }

    /// Decode the lanes set in `mask`; other lanes are zero and unchecked
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = species.length(), byte_offset = byte_offset as i64)))]
    pub fn from_bytes_masked(
        species: Species<E>,
        src: &[u8],
        byte_offset: isize,
        order: ByteOrder,
        mask: &Mask<E>,
    ) -> Result<Self> {
        species.check(&mask.species())?;
        let access =
            Access::contiguous(byte_offset, species.element_size()).masked(mask.as_slice());
        load_bytes(species, src, &access, order)
    }

    /// Encode all lanes into `target` starting at `byte_offset`
    ///
    /// # Errors
    ///
    /// - [`LaneError::ReadOnlyTarget`] if `target` is read-only
    /// - [`LaneError::IndexOutOfBounds`] if the byte range does not fit
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = self.length(), byte_offset = byte_offset as i64)))]
    pub fn into_bytes(
        &self,
        target: &mut ByteRegion<'_>,
        byte_offset: isize,
        order: ByteOrder,
    ) -> Result<()> {
        let access = Access::contiguous(byte_offset, self.species().element_size());
        store_bytes(self, target, &access, order)
    }

    /// Encode the lanes set in `mask`; other bytes are left untouched
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(lanes = self.length(), byte_offset = byte_offset as i64)))]
    pub fn into_bytes_masked(
        &self,
        target: &mut ByteRegion<'_>,
        byte_offset: isize,
        order: ByteOrder,
        mask: &Mask<E>,
    ) -> Result<()> {
        self.check_mask(mask)?;
        let access = Access::contiguous(byte_offset, self.species().element_size())
            .masked(mask.as_slice());
        store_bytes(self, target, &access, order)
    }
}

impl Vector<i16> {
    /// Load `int16` lanes from UTF-16 code units (bit-for-bit)
    pub fn from_char_array(species: Species<i16>, src: &[u16], offset: isize) -> Result<Self> {
        load(species, src, &Access::contiguous(offset, 1), |c| c as i16)
    }

    pub fn from_char_array_masked(
        species: Species<i16>,
        src: &[u16],
        offset: isize,
        mask: &Mask<i16>,
    ) -> Result<Self> {
        species.check(&mask.species())?;
        let access = Access::contiguous(offset, 1).masked(mask.as_slice());
        load(species, src, &access, |c| c as i16)
    }

    /// Store lanes as UTF-16 code units (bit-for-bit)
    pub fn into_char_array(&self, dst: &mut [u16], offset: isize) -> Result<()> {
        store(self, dst, &Access::contiguous(offset, 1), |x| x as u16)
    }

    pub fn into_char_array_masked(
        &self,
        dst: &mut [u16],
        offset: isize,
        mask: &Mask<i16>,
    ) -> Result<()> {
        self.check_mask(mask)?;
        let access = Access::contiguous(offset, 1).masked(mask.as_slice());
        store(self, dst, &access, |x| x as u16)
    }
}

impl Vector<i8> {
    /// Load `int8` lanes from booleans (`true` is 1, `false` is 0)
    pub fn from_boolean_array(species: Species<i8>, src: &[bool], offset: isize) -> Result<Self> {
        load(species, src, &Access::contiguous(offset, 1), i8::from)
    }

    pub fn from_boolean_array_masked(
        species: Species<i8>,
        src: &[bool],
        offset: isize,
        mask: &Mask<i8>,
    ) -> Result<Self> {
        species.check(&mask.species())?;
        let access = Access::contiguous(offset, 1).masked(mask.as_slice());
        load(species, src, &access, i8::from)
    }

    /// Store the low bit of each lane as a boolean
    pub fn into_boolean_array(&self, dst: &mut [bool], offset: isize) -> Result<()> {
        store(self, dst, &Access::contiguous(offset, 1), |x| x & 1 != 0)
    }

    pub fn into_boolean_array_masked(
        &self,
        dst: &mut [bool],
        offset: isize,
        mask: &Mask<i8>,
    ) -> Result<()> {
        self.check_mask(mask)?;
        let access = Access::contiguous(offset, 1).masked(mask.as_slice());
        store(self, dst, &access, |x| x & 1 != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    fn species_i32() -> Species<i32> {
        Species::<i32>::new(Shape::S128).unwrap()
    }

    #[test]
    fn test_check_range() {
        assert_eq!(check_range(0, 4, 4), Ok(0));
        assert_eq!(check_range(2, 2, 4), Ok(2));
        assert_eq!(check_range(4, 0, 4), Ok(4));
        assert!(check_range(3, 2, 4).is_err());
        assert!(check_range(-1, 1, 4).is_err());
        assert!(check_range(isize::MAX, 2, 4).is_err());
    }

    #[test]
    fn test_unmasked_boundary() {
        let species = species_i32();
        let data: Vec<i32> = (0..10).collect();
        assert!(Vector::from_array(species, &data, 6).is_ok());
        assert_eq!(
            Vector::from_array(species, &data, 7),
            Err(LaneError::IndexOutOfBounds {
                index: 7,
                size: 4,
                length: 10
            })
        );
        assert!(Vector::from_array(species, &data, -1).is_err());
    }

    #[test]
    fn test_masked_load_checks_active_lanes_only() {
        let species = species_i32();
        let data: Vec<i32> = (1..=10).collect();
        let low = Mask::from_long(species, 0b0111);
        let v = Vector::from_array_masked(species, &data, 7, &low).unwrap();
        assert_eq!(v.as_slice(), &[8, 9, 10, 0]);

        let all = species.mask_all(true);
        assert_eq!(
            Vector::from_array_masked(species, &data, 7, &all),
            Err(LaneError::IndexOutOfBounds {
                index: 10,
                size: 1,
                length: 10
            })
        );

        let high = Mask::from_long(species, 0b1100);
        let v = Vector::from_array_masked(species, &data, -2, &high).unwrap();
        assert_eq!(v.as_slice(), &[0, 0, 1, 2]);
    }

    #[test]
    fn test_store_round_trip() {
        let species = species_i32();
        let v = species.from_values(&[1, 2, 3, 4]).unwrap();
        let mut out = [0; 6];
        v.into_array(&mut out, 1).unwrap();
        assert_eq!(out, [0, 1, 2, 3, 4, 0]);
        assert!(v.into_array(&mut out, 3).is_err());
        assert_eq!(out, [0, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_masked_store_leaves_inactive_positions() {
        let species = species_i32();
        let v = species.from_values(&[1, 2, 3, 4]).unwrap();
        let mut out = [9; 4];
        let even = Mask::from_long(species, 0b0101);
        v.into_array_masked(&mut out, 0, &even).unwrap();
        assert_eq!(out, [1, 9, 3, 9]);
    }

    #[test]
    fn test_failed_masked_store_writes_nothing() {
        let species = species_i32();
        let v = species.from_values(&[1, 2, 3, 4]).unwrap();
        let mut out = [0; 5];
        let all = species.mask_all(true);
        assert!(v.into_array_masked(&mut out, 2, &all).is_err());
        assert_eq!(out, [0; 5]);
    }

    #[test]
    fn test_gather() {
        let species = species_i32();
        let data = [10, 20, 30, 40, 50, 60];
        let map = [9, 5, 0, 3, 1, 2];
        let v = Vector::from_array_indexed(species, &data, 0, &map, 1).unwrap();
        assert_eq!(v.as_slice(), &[60, 10, 40, 20]);
        assert!(Vector::from_array_indexed(species, &data, 0, &map, 0).is_err());
        assert!(Vector::from_array_indexed(species, &data, 0, &map, 3).is_err());

        let skip_first = Mask::from_long(species, 0b1110);
        let v =
            Vector::from_array_indexed_masked(species, &data, 0, &map, 0, &skip_first).unwrap();
        assert_eq!(v.as_slice(), &[0, 60, 10, 40]);
        assert!(
            Vector::from_array_indexed_masked(species, &data, 1, &map, 0, &skip_first).is_err()
        );
    }

    #[test]
    fn test_scatter_last_lane_wins() {
        let species = species_i32();
        let v = species.from_values(&[1, 2, 3, 4]).unwrap();
        let mut out = [0; 4];
        v.into_array_indexed(&mut out, 0, &[2, 0, 2, 1], 0).unwrap();
        assert_eq!(out, [2, 4, 3, 0]);

        let mut out = [0; 4];
        let m = Mask::from_long(species, 0b0011);
        v.into_array_indexed_masked(&mut out, 1, &[0, 1, 7, 9], 0, &m)
            .unwrap();
        assert_eq!(out, [0, 1, 2, 0]);
    }

    #[test]
    fn test_byte_orders() {
        let species = Species::<i32>::new(Shape::S64).unwrap();
        let v = species.from_values(&[0x0102_0304, -2]).unwrap();
        let mut buf = [0u8; 8];
        let mut region = ByteRegion::from(&mut buf[..]);
        v.into_bytes(&mut region, 0, ByteOrder::LittleEndian).unwrap();
        assert_eq!(buf, [4, 3, 2, 1, 0xfe, 0xff, 0xff, 0xff]);

        let be = Vector::from_bytes(species, &buf, 0, ByteOrder::BigEndian).unwrap();
        assert_eq!(be.as_slice(), &[0x0403_0201, -16_777_217]);
        let le = Vector::from_bytes(species, &buf, 0, ByteOrder::LittleEndian).unwrap();
        assert_eq!(le, v);
    }

    #[test]
    fn test_byte_bounds() {
        let species = Species::<i16>::new(Shape::S64).unwrap();
        let buf = [0u8; 10];
        assert!(Vector::from_bytes(species, &buf, 2, ByteOrder::BigEndian).is_ok());
        assert_eq!(
            Vector::from_bytes(species, &buf, 3, ByteOrder::BigEndian),
            Err(LaneError::IndexOutOfBounds {
                index: 3,
                size: 8,
                length: 10
            })
        );
        let low = Mask::from_long(species, 0b0111);
        assert!(Vector::from_bytes_masked(species, &buf, 4, ByteOrder::BigEndian, &low).is_ok());
        let all = species.mask_all(true);
        assert!(Vector::from_bytes_masked(species, &buf, 3, ByteOrder::BigEndian, &all).is_err());
    }

    #[test]
    fn test_read_only_checked_before_bounds() {
        let species = Species::<i64>::new(Shape::S128).unwrap();
        let v = species.broadcast(1);
        let buf = [0u8; 4];
        let mut region = ByteRegion::from(&buf[..]);
        assert_eq!(
            v.into_bytes(&mut region, 100, ByteOrder::LittleEndian),
            Err(LaneError::ReadOnlyTarget)
        );
        let none = species.mask_all(false);
        assert_eq!(
            v.into_bytes_masked(&mut region, 0, ByteOrder::LittleEndian, &none),
            Err(LaneError::ReadOnlyTarget)
        );
    }

    #[test]
    fn test_masked_byte_store() {
        let species = Species::<i16>::new(Shape::S64).unwrap();
        let v = species.from_values(&[0x0102, 0x0304, 0x0506, 0x0708]).unwrap();
        let mut buf = [0u8; 8];
        let mut region = ByteRegion::Writable(&mut buf);
        let odd = Mask::from_long(species, 0b1010);
        v.into_bytes_masked(&mut region, 0, ByteOrder::BigEndian, &odd)
            .unwrap();
        assert_eq!(buf, [0, 0, 3, 4, 0, 0, 7, 8]);
    }

    #[test]
    fn test_char_array() {
        let species = Species::<i16>::new(Shape::S64).unwrap();
        let text: Vec<u16> = "vector".encode_utf16().collect();
        let v = Vector::from_char_array(species, &text, 2).unwrap();
        assert_eq!(v.as_slice(), &[b'c' as i16, b't' as i16, b'o' as i16, b'r' as i16]);

        let high = species.broadcast(-1);
        let mut out = [0u16; 4];
        high.into_char_array(&mut out, 0).unwrap();
        assert_eq!(out, [u16::MAX; 4]);

        let first = Mask::from_long(species, 0b0001);
        let mut out = [0u16; 1];
        high.into_char_array_masked(&mut out, 0, &first).unwrap();
        assert_eq!(out, [u16::MAX]);
        let v = Vector::from_char_array_masked(species, &text, 5, &first).unwrap();
        assert_eq!(v.as_slice(), &[b'r' as i16, 0, 0, 0]);
    }

    #[test]
    fn test_boolean_array() {
        let species = Species::<i8>::new(Shape::S64).unwrap();
        let bits = [true, false, true, true, false, false, true, false];
        let v = Vector::from_boolean_array(species, &bits, 0).unwrap();
        assert_eq!(v.as_slice(), &[1, 0, 1, 1, 0, 0, 1, 0]);

        let lanes = species.from_values(&[2, 3, -1, 0, 4, 5, 6, 7]).unwrap();
        let mut out = [false; 8];
        lanes.into_boolean_array(&mut out, 0).unwrap();
        assert_eq!(out, [false, true, true, false, false, true, false, true]);

        let low = Mask::from_long(species, 0x0f);
        let mut out = [false; 4];
        lanes.into_boolean_array_masked(&mut out, 0, &low).unwrap();
        assert_eq!(out, [false, true, true, false]);
        let v = Vector::from_boolean_array_masked(species, &bits[4..], 0, &low).unwrap();
        assert_eq!(v.as_slice(), &[0, 0, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_region_accessors() {
        let mut buf = [1u8, 2, 3];
        let region = ByteRegion::from(&mut buf[..]);
        assert_eq!(region.len(), 3);
        assert!(!region.is_read_only());
        assert_eq!(region.as_bytes(), &[1, 2, 3]);
        assert!(ByteRegion::ReadOnly(&[]).is_empty());
        assert_eq!(ByteOrder::default(), ByteOrder::native());
    }
}
