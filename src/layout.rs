use {
    crate::selection::{Axis, Extents},
    byteorder::{BigEndian, ByteOrder, LittleEndian},
    serde::{Deserialize, Serialize},
};

/// Floating point width of each stored element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Single,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    Little,
    Big,
}

/// Which axis varies fastest in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    /// `[z][y][x]`, element `(i, j, k)` at `i + nx * (j + ny * k)`
    XFastest,
    /// `[x][y][z]`, element `(i, j, k)` at `k + nz * (j + ny * i)`
    ZFastest,
}

/// On-disk layout of a raw snapshot dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub precision: Precision,
    pub endianness: Endianness,
    pub order: AxisOrder,
}

impl Default for Layout {
    /// 32-bit little-endian floats, x fastest
    fn default() -> Self {
        Layout {
            precision: Precision::Single,
            endianness: Endianness::Little,
            order: AxisOrder::XFastest,
        }
    }
}

impl Layout {
    /// Bytes per stored element
    pub fn element_size(&self) -> usize {
        match self.precision {
            Precision::Single => 4,
            Precision::Double => 8,
        }
    }

    /// Expected byte size of a full snapshot, `None` if it overflows
    pub fn file_size(&self, extents: &Extents) -> Option<u64> {
        (extents.checked_len()? as u64).checked_mul(self.element_size() as u64)
    }

    pub fn fastest_axis(&self) -> Axis {
        match self.order {
            AxisOrder::XFastest => Axis::X,
            AxisOrder::ZFastest => Axis::Z,
        }
    }

    /// Element offset of grid point `(i, j, k)`
    pub fn linear_index(&self, extents: &Extents, i: usize, j: usize, k: usize) -> usize {
        match self.order {
            AxisOrder::XFastest => i + extents.nx * (j + extents.ny * k),
            AxisOrder::ZFastest => k + extents.nz * (j + extents.ny * i),
        }
    }

    /// Byte offset of grid point `(i, j, k)`
    pub fn byte_offset(&self, extents: &Extents, i: usize, j: usize, k: usize) -> u64 {
        self.linear_index(extents, i, j, k) as u64 * self.element_size() as u64
    }

    /// Decodes one element from the front of `buf`
    pub fn read(&self, buf: &[u8]) -> f64 {
        match (self.precision, self.endianness) {
            (Precision::Single, Endianness::Little) => f64::from(LittleEndian::read_f32(buf)),
            (Precision::Single, Endianness::Big) => f64::from(BigEndian::read_f32(buf)),
            (Precision::Double, Endianness::Little) => LittleEndian::read_f64(buf),
            (Precision::Double, Endianness::Big) => BigEndian::read_f64(buf),
        }
    }

    /// Decodes a buffer holding a whole number of elements
    pub fn decode(&self, bytes: &[u8]) -> Vec<f64> {
        bytes
            .chunks_exact(self.element_size())
            .map(|chunk| self.read(chunk))
            .collect()
    }

    /// Encodes values in this layout, used to produce synthetic snapshots
    pub fn encode(&self, values: &[f64]) -> Vec<u8> {
        let size = self.element_size();
        let mut bytes = vec![0u8; values.len() * size];

        for (chunk, &x) in bytes.chunks_exact_mut(size).zip(values) {
            match (self.precision, self.endianness) {
                (Precision::Single, Endianness::Little) => {
                    LittleEndian::write_f32(chunk, x as f32)
                }
                (Precision::Single, Endianness::Big) => BigEndian::write_f32(chunk, x as f32),
                (Precision::Double, Endianness::Little) => LittleEndian::write_f64(chunk, x),
                (Precision::Double, Endianness::Big) => BigEndian::write_f64(chunk, x),
            }
        }

        bytes
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_sst_format() {
        let layout = Layout::default();
        assert_eq!(layout.element_size(), 4);
        assert_eq!(
            layout.file_size(&Extents::new(514, 256, 512)),
            Some(269_484_032)
        );
    }

    #[test]
    fn file_size_overflow() {
        let double = Layout {
            precision: Precision::Double,
            ..Layout::default()
        };
        assert_eq!(Layout::default().file_size(&Extents::new(1 << 32, 1 << 32, 1)), None);
        assert_eq!(double.file_size(&Extents::new(1 << 31, 1 << 31, 1 << 1)), None);
        assert_eq!(
            double.file_size(&Extents::new(1 << 30, 1 << 30, 1)),
            Some(1 << 63)
        );
    }

    #[test]
    fn little_endian_single() {
        // 1.5f32 = 0x3FC00000
        let layout = Layout::default();
        assert_eq!(layout.decode(&[0x00, 0x00, 0xC0, 0x3F]), vec![1.5]);
    }

    #[test]
    fn big_endian_double() {
        let layout = Layout {
            precision: Precision::Double,
            endianness: Endianness::Big,
            order: AxisOrder::XFastest,
        };
        let bytes = (-2.25f64).to_be_bytes();
        assert_eq!(layout.decode(&bytes), vec![-2.25]);
        assert_eq!(layout.encode(&[-2.25]), bytes.to_vec());
    }

    #[test]
    fn linear_index_orders() {
        let extents = Extents::new(4, 3, 2);
        let x_fastest = Layout::default();
        let z_fastest = Layout {
            order: AxisOrder::ZFastest,
            ..Layout::default()
        };

        assert_eq!(x_fastest.linear_index(&extents, 1, 0, 0), 1);
        assert_eq!(x_fastest.linear_index(&extents, 0, 1, 0), 4);
        assert_eq!(x_fastest.linear_index(&extents, 3, 2, 1), 23);

        assert_eq!(z_fastest.linear_index(&extents, 0, 0, 1), 1);
        assert_eq!(z_fastest.linear_index(&extents, 0, 1, 0), 2);
        assert_eq!(z_fastest.linear_index(&extents, 3, 2, 1), 23);
        assert_eq!(z_fastest.byte_offset(&extents, 1, 0, 0), 24);
    }
}
