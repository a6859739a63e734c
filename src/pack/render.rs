//! Textual renderings of a packed bitmap.
//!
//! All views here read only the packed bytes and stored dimensions; none of
//! them goes back to the source grid.

use super::bitmap::PackedBitmap;

impl PackedBitmap {
    /// One `0xHH` token per byte, uppercase hex, in byte order.
    pub fn hex_tokens(&self) -> Vec<String> {
        self.bytes().iter().map(|b| format!("0x{:02X}", b)).collect()
    }

    /// One line per grid row; each byte rendered as 8 binary digits, most
    /// significant bit first, bytes of the same row separated by a space.
    pub fn binary_rows(&self) -> Vec<String> {
        let bpr = self.bytes_per_row();
        self.bytes()
            .chunks(bpr)
            .map(|row| {
                row.iter()
                    .map(|b| format!("{:08b}", b))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    /// A C byte-array snippet ready to paste next to a display driver call.
    ///
    /// `name` becomes the array identifier. Bytes are grouped one grid row
    /// per line so the array can be eyeballed against the drawing.
    pub fn c_array(&self, name: &str) -> String {
        let bpr = self.bytes_per_row();
        let mut out = String::new();
        out.push_str(&format!(
            "// Bytes for PROGMEM (u8g2) - grid {}x{}\n",
            self.width(),
            self.height()
        ));
        out.push_str(&format!(
            "// {} rows x {} columns = {} bytes\n\n",
            self.height(),
            self.width(),
            self.len()
        ));
        out.push_str(&format!(
            "static const unsigned char {}[] PROGMEM = {{\n",
            name
        ));
        for row in self.bytes().chunks(bpr) {
            out.push_str("  ");
            for b in row {
                out.push_str(&format!("0x{:02X}, ", b));
            }
            // Drop the trailing space, keep the comma.
            out.pop();
            out.push('\n');
        }
        out.push_str("};\n\n");
        out.push_str(&format!("// Size: {} bytes\n", self.len()));
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::Grid;
    use crate::pack::pack;

    #[test]
    fn test_hex_tokens_uppercase_two_digits() {
        let mut grid = Grid::new(8, 2);
        grid.set(0, 0, true);
        grid.set(1, 0, true);
        grid.set(3, 0, true);
        grid.set(7, 1, true);
        let bitmap = pack(&grid).unwrap();
        assert_eq!(bitmap.hex_tokens(), vec!["0x0B", "0x80"]);
    }

    #[test]
    fn test_binary_rows_msb_first() {
        let mut grid = Grid::new(8, 1);
        grid.set(0, 0, true); // bit 0 -> printed last
        let bitmap = pack(&grid).unwrap();
        assert_eq!(bitmap.binary_rows(), vec!["00000001"]);
    }

    #[test]
    fn test_binary_rows_group_wide_rows() {
        let mut grid = Grid::new(16, 2);
        grid.set(0, 0, true);
        grid.set(15, 0, true);
        let bitmap = pack(&grid).unwrap();
        let rows = bitmap.binary_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "00000001 10000000");
        assert_eq!(rows[1], "00000000 00000000");
    }

    #[test]
    fn test_c_array_shape() {
        let mut grid = Grid::new(8, 2);
        grid.set(0, 0, true);
        let bitmap = pack(&grid).unwrap();
        let code = bitmap.c_array("wifi_bits");

        assert!(code.contains("static const unsigned char wifi_bits[] PROGMEM = {"));
        assert!(code.contains("  0x01,"));
        assert!(code.contains("  0x00,"));
        assert!(code.contains("grid 8x2"));
        assert!(code.contains("2 rows x 8 columns = 2 bytes"));
        assert!(code.contains("// Size: 2 bytes"));
        assert!(code.trim_end().ends_with("// Size: 2 bytes"));
    }

    #[test]
    fn test_c_array_groups_bytes_by_row() {
        let bitmap = pack(&Grid::new(16, 1)).unwrap();
        let code = bitmap.c_array("icon_bits");
        assert!(code.contains("  0x00, 0x00,\n"), "both row bytes on one line");
    }

    #[test]
    fn test_views_need_only_the_bitmap() {
        // Equal bitmaps from different grid instances render identically.
        let a = pack(&Grid::new(9, 3)).unwrap();
        let b = pack(&Grid::new(9, 3)).unwrap();
        assert_eq!(a.hex_tokens(), b.hex_tokens());
        assert_eq!(a.binary_rows(), b.binary_rows());
        assert_eq!(a.c_array("x"), b.c_array("x"));
    }
}
