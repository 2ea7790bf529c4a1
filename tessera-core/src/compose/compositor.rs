//! Frame compositor
//!
//! Rows are produced top to bottom, each left to right, matching the
//! write order the controller expects after `RAMWR`. Within a row the
//! layer stack is painted back to front, so the topmost visible, opaque
//! placement covering a cell decides its color. Rows do not depend on
//! each other and can be streamed as they are produced.

use alloc::vec::Vec;

use super::group::{Group, Layer};
use super::scene::Scene;
use super::tile::TileGrid;
use super::ComposeError;
use crate::color::{ByteOrder, Rgb565, Rgb888};

/// Flattens layer stacks into RGB565 pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Compositor {
    background: Rgb565,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(Rgb888::BLACK)
    }
}

impl Compositor {
    /// Create a compositor with the given background color
    pub const fn new(background: Rgb888) -> Self {
        Self {
            background: background.pack(),
        }
    }

    /// Packed color of uncovered cells
    pub const fn background(&self) -> Rgb565 {
        self.background
    }

    /// Render surface row `y` into `row`
    ///
    /// The surface is `row.len()` pixels wide. Every visible bitmap is
    /// checked in full first, so streaming a frame row by row costs one
    /// check per row; [`Compositor::render_frame`] checks once.
    pub fn render_row(
        &self,
        scene: &Scene,
        root: &Group,
        y: u16,
        row: &mut [Rgb565],
    ) -> Result<(), ComposeError> {
        self.validate(scene, root)?;
        self.paint_row(scene, root, y, row)
    }

    /// Render a whole frame into `out`, which must hold `width * height` pixels
    pub fn render_frame(
        &self,
        scene: &Scene,
        root: &Group,
        width: u16,
        height: u16,
        out: &mut [Rgb565],
    ) -> Result<(), ComposeError> {
        let width = width as usize;
        let expected = width * height as usize;
        if out.len() != expected {
            return Err(ComposeError::BufferSize {
                expected,
                actual: out.len(),
            });
        }
        self.validate(scene, root)?;
        if width == 0 {
            return Ok(());
        }

        for (y, row) in out.chunks_exact_mut(width).enumerate() {
            self.paint_row(scene, root, y as u16, row)?;
        }
        Ok(())
    }

    /// Render a whole frame as wire bytes
    ///
    /// `out` must hold `width * height * 2` bytes.
    pub fn render_frame_bytes(
        &self,
        scene: &Scene,
        root: &Group,
        width: u16,
        height: u16,
        order: ByteOrder,
        out: &mut [u8],
    ) -> Result<(), ComposeError> {
        let row_bytes = width as usize * 2;
        let expected = row_bytes * height as usize;
        if out.len() != expected {
            return Err(ComposeError::BufferSize {
                expected,
                actual: out.len(),
            });
        }
        self.validate(scene, root)?;
        if row_bytes == 0 {
            return Ok(());
        }

        let mut row = alloc::vec![self.background; width as usize];
        for (y, dst) in out.chunks_exact_mut(row_bytes).enumerate() {
            self.paint_row(scene, root, y as u16, &mut row)?;
            for (pixel, bytes) in row.iter().zip(dst.chunks_exact_mut(2)) {
                bytes.copy_from_slice(&pixel.to_bytes(order));
            }
        }
        Ok(())
    }

    /// Render a whole frame into a new buffer
    pub fn render(
        &self,
        scene: &Scene,
        root: &Group,
        width: u16,
        height: u16,
    ) -> Result<Vec<Rgb565>, ComposeError> {
        let mut out = alloc::vec![self.background; width as usize * height as usize];
        self.render_frame(scene, root, width, height, &mut out)?;
        Ok(out)
    }

    /// Check every cell of every visible bitmap against its palette
    ///
    /// Cells outside the surface and cells painted over by later layers
    /// are checked too. Hidden tiles and groups are skipped.
    pub fn validate(&self, scene: &Scene, root: &Group) -> Result<(), ComposeError> {
        check_group(scene, root)
    }

    fn paint_row(
        &self,
        scene: &Scene,
        root: &Group,
        y: u16,
        row: &mut [Rgb565],
    ) -> Result<(), ComposeError> {
        row.fill(self.background);
        self.paint_group(scene, root, 0, 0, y, row)
    }

    fn paint_group(
        &self,
        scene: &Scene,
        group: &Group,
        origin_x: i64,
        origin_y: i64,
        y: u16,
        row: &mut [Rgb565],
    ) -> Result<(), ComposeError> {
        if group.hidden {
            return Ok(());
        }
        // i64 holds any i32 offset sum without overflow
        let origin_x = origin_x + i64::from(group.x);
        let origin_y = origin_y + i64::from(group.y);

        for layer in group.layers() {
            match layer {
                Layer::Tile(tile) => self.paint_tile(scene, tile, origin_x, origin_y, y, row)?,
                Layer::Group(child) => {
                    self.paint_group(scene, child, origin_x, origin_y, y, row)?
                }
            }
        }
        Ok(())
    }

    fn paint_tile(
        &self,
        scene: &Scene,
        tile: &TileGrid,
        origin_x: i64,
        origin_y: i64,
        y: u16,
        row: &mut [Rgb565],
    ) -> Result<(), ComposeError> {
        if tile.hidden {
            return Ok(());
        }
        let bitmap = scene.bitmap(tile.bitmap)?;
        let palette = scene.palette(tile.palette)?;

        let left = origin_x + i64::from(tile.x);
        let top = origin_y + i64::from(tile.y);
        let bitmap_y = i64::from(y) - top;
        if bitmap_y < 0 || bitmap_y >= i64::from(bitmap.height()) {
            return Ok(());
        }
        let bitmap_y = bitmap_y as u16;
        let Some(cells) = bitmap.row(bitmap_y) else {
            return Ok(());
        };

        let start = left.max(0);
        let end = (left + i64::from(bitmap.width())).min(row.len() as i64);
        for x in start..end {
            let bitmap_x = (x - left) as usize;
            let index = cells[bitmap_x];
            let entry = palette.get(index).ok_or(ComposeError::InvalidIndex {
                bitmap: tile.bitmap,
                x: bitmap_x as u16,
                y: bitmap_y,
                index,
                palette_len: palette.len(),
            })?;
            if !entry.is_transparent() {
                row[x as usize] = entry.packed();
            }
        }
        Ok(())
    }
}

fn check_group(scene: &Scene, group: &Group) -> Result<(), ComposeError> {
    if group.hidden {
        return Ok(());
    }
    for layer in group.layers() {
        match layer {
            Layer::Tile(tile) => check_tile(scene, tile)?,
            Layer::Group(child) => check_group(scene, child)?,
        }
    }
    Ok(())
}

fn check_tile(scene: &Scene, tile: &TileGrid) -> Result<(), ComposeError> {
    if tile.hidden {
        return Ok(());
    }
    let bitmap = scene.bitmap(tile.bitmap)?;
    let palette_len = scene.palette(tile.palette)?.len();

    for y in 0..bitmap.height() {
        let Some(cells) = bitmap.row(y) else {
            continue;
        };
        if let Some(x) = cells.iter().position(|&i| usize::from(i) >= palette_len) {
            return Err(ComposeError::InvalidIndex {
                bitmap: tile.bitmap,
                x: x as u16,
                y,
                index: cells[x],
                palette_len,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{Bitmap, Palette};

    const BLACK: Rgb565 = Rgb565::from_raw(0x0000);
    const RED: Rgb565 = Rgb565::from_raw(0xF800);
    const GREEN: Rgb565 = Rgb565::from_raw(0x07E0);
    const BLUE: Rgb565 = Rgb565::from_raw(0x001F);

    fn four_color_scene(width: u16, height: u16) -> (Scene, TileGrid) {
        let mut scene = Scene::new();
        let palette = scene.add_palette(
            Palette::from_colors(&[Rgb888::BLACK, Rgb888::RED, Rgb888::GREEN, Rgb888::BLUE])
                .unwrap(),
        );
        let bitmap = scene.add_bitmap(Bitmap::new(width, height, 4).unwrap());
        (scene, TileGrid::new(bitmap, palette))
    }

    fn solid(scene: &mut Scene, width: u16, height: u16, color: Rgb888) -> TileGrid {
        let palette = scene.add_palette(Palette::from_colors(&[color]).unwrap());
        let bitmap = scene.add_bitmap(Bitmap::new(width, height, 1).unwrap());
        TileGrid::new(bitmap, palette)
    }

    #[test]
    fn test_raster_bands_full_panel() {
        let (mut scene, tile) = four_color_scene(320, 480);
        let bitmap = scene.bitmap_mut(tile.bitmap).unwrap();
        for band in 0..4u16 {
            bitmap.fill_rect(0, band * 120, 320, 120, band as u8).unwrap();
        }

        let root = Group::new().with(tile);
        let frame = Compositor::default().render(&scene, &root, 320, 480).unwrap();
        assert_eq!(frame.len(), 320 * 480);

        let row = |y: usize| &frame[y * 320..(y + 1) * 320];
        assert!(row(0).iter().all(|&p| p == BLACK));
        assert!(row(200).iter().all(|&p| p == RED));
        assert!(row(300).iter().all(|&p| p == GREEN));
        assert!(row(400).iter().all(|&p| p == BLUE));
        assert!(row(119).iter().all(|&p| p == BLACK));
        assert!(row(120).iter().all(|&p| p == RED));
    }

    #[test]
    fn test_empty_stack_is_background() {
        let scene = Scene::new();
        let compositor = Compositor::new(Rgb888::from_u32(0x000080));
        let frame = compositor.render(&scene, &Group::new(), 4, 3).unwrap();
        assert!(frame.iter().all(|&p| p == Rgb565::from_raw(0x0010)));
    }

    #[test]
    fn test_later_layers_draw_on_top() {
        let mut scene = Scene::new();
        let back = solid(&mut scene, 4, 4, Rgb888::RED);
        let front = solid(&mut scene, 2, 2, Rgb888::BLUE).at(1, 1);
        let root = Group::new().with(back).with(front);

        let frame = Compositor::default().render(&scene, &root, 4, 4).unwrap();
        assert_eq!(frame[0], RED);
        assert_eq!(frame[4 + 1], BLUE);
        assert_eq!(frame[2 * 4 + 2], BLUE);
        assert_eq!(frame[3 * 4 + 3], RED);
    }

    #[test]
    fn test_partial_tile_leaves_background() {
        let mut scene = Scene::new();
        let dash = solid(&mut scene, 3, 1, Rgb888::WHITE).at(2, 1);
        let root = Group::new().with(dash);

        let frame = Compositor::default().render(&scene, &root, 6, 3).unwrap();
        let white = Rgb888::WHITE.pack();
        assert_eq!(&frame[6..12], &[BLACK, BLACK, white, white, white, BLACK]);
        assert!(frame[..6].iter().all(|&p| p == BLACK));
    }

    #[test]
    fn test_offscreen_parts_are_clipped() {
        let mut scene = Scene::new();
        let tile = solid(&mut scene, 4, 4, Rgb888::GREEN).at(-2, -3);
        let root = Group::new().with(tile);

        let frame = Compositor::default().render(&scene, &root, 3, 3).unwrap();
        assert_eq!(&frame[..3], &[GREEN, GREEN, BLACK]);
        assert_eq!(&frame[3..6], &[BLACK, BLACK, BLACK]);
    }

    #[test]
    fn test_transparent_entries_show_lower_layers() {
        let mut scene = Scene::new();
        let back = solid(&mut scene, 2, 1, Rgb888::RED);

        let mut palette = Palette::from_colors(&[Rgb888::BLACK, Rgb888::BLUE]).unwrap();
        palette.make_transparent(0).unwrap();
        let palette = scene.add_palette(palette);
        let mut bitmap = Bitmap::new(2, 1, 2).unwrap();
        bitmap.set(1, 0, 1).unwrap();
        let bitmap = scene.add_bitmap(bitmap);

        let root = Group::new().with(back).with(TileGrid::new(bitmap, palette));
        let frame = Compositor::default().render(&scene, &root, 2, 1).unwrap();
        assert_eq!(frame, [RED, BLUE]);
    }

    #[test]
    fn test_hidden_layers_are_skipped() {
        let mut scene = Scene::new();
        let back = solid(&mut scene, 1, 1, Rgb888::RED);
        let front = solid(&mut scene, 1, 1, Rgb888::BLUE).with_hidden(true);
        let root = Group::new().with(back).with(front);

        let frame = Compositor::default().render(&scene, &root, 1, 1).unwrap();
        assert_eq!(frame, [RED]);

        let mut hidden_group = Group::new().with(back);
        hidden_group.hidden = true;
        let root = Group::new().with(hidden_group);
        let frame = Compositor::default().render(&scene, &root, 1, 1).unwrap();
        assert_eq!(frame, [BLACK]);
    }

    #[test]
    fn test_nested_group_offsets_accumulate() {
        let mut scene = Scene::new();
        let mut rule = Group::new().at(1, 2);
        for x in (0..6).step_by(3) {
            rule.push(solid(&mut scene, 2, 1, Rgb888::WHITE).at(x, 0));
        }
        let root = Group::new().at(0, 1).with(rule);

        let frame = Compositor::default().render(&scene, &root, 8, 4).unwrap();
        let white = Rgb888::WHITE.pack();
        assert_eq!(
            &frame[3 * 8..4 * 8],
            &[BLACK, white, white, BLACK, white, white, BLACK, BLACK]
        );
        assert!(frame[..3 * 8].iter().all(|&p| p == BLACK));
    }

    #[test]
    fn test_invalid_index_fails_fast() {
        let (mut scene, tile) = four_color_scene(4, 4);
        scene.bitmap_mut(tile.bitmap).unwrap().cells_mut()[2 * 4 + 3] = 4;
        let root = Group::new().with(tile);

        let err = Compositor::default().render(&scene, &root, 4, 4).unwrap_err();
        assert_eq!(
            err,
            ComposeError::InvalidIndex {
                bitmap: tile.bitmap,
                x: 3,
                y: 2,
                index: 4,
                palette_len: 4
            }
        );
    }

    #[test]
    fn test_invalid_index_outside_surface_still_fails() {
        let (mut scene, tile) = four_color_scene(4, 4);
        scene.bitmap_mut(tile.bitmap).unwrap().cells_mut()[3 * 4 + 3] = 9;
        let root = Group::new().with(tile);

        let compositor = Compositor::default();
        let expected = ComposeError::InvalidIndex {
            bitmap: tile.bitmap,
            x: 3,
            y: 3,
            index: 9,
            palette_len: 4,
        };
        assert_eq!(compositor.render(&scene, &root, 3, 3), Err(expected));

        let mut row = [BLACK; 3];
        assert_eq!(compositor.render_row(&scene, &root, 0, &mut row), Err(expected));

        // A hidden tile is never drawn, so its cells are not checked
        let root = Group::new().with(tile.with_hidden(true));
        assert!(compositor.render(&scene, &root, 3, 3).is_ok());
    }

    #[test]
    fn test_extreme_offsets_are_clipped() {
        let mut scene = Scene::new();
        let far_right = solid(&mut scene, 4, 1, Rgb888::RED).at(i32::MAX, 0);
        let far_left = solid(&mut scene, 4, 1, Rgb888::RED).at(i32::MIN, 0);
        let nested = Group::new()
            .at(i32::MAX, i32::MAX)
            .with(solid(&mut scene, 4, 1, Rgb888::RED).at(i32::MAX, i32::MAX));
        let root = Group::new().with(far_right).with(far_left).with(nested);

        let frame = Compositor::default().render(&scene, &root, 4, 1).unwrap();
        assert_eq!(frame, [BLACK; 4]);
    }

    #[test]
    fn test_invalid_index_under_another_layer_still_fails() {
        let (mut scene, tile) = four_color_scene(2, 2);
        scene.bitmap_mut(tile.bitmap).unwrap().cells_mut()[0] = 200;
        let cover = solid(&mut scene, 2, 2, Rgb888::WHITE);
        let root = Group::new().with(tile).with(cover);

        let result = Compositor::default().render(&scene, &root, 2, 2);
        assert!(matches!(
            result,
            Err(ComposeError::InvalidIndex { index: 200, .. })
        ));
    }

    #[test]
    fn test_unknown_handle() {
        let mut other = Scene::new();
        let tile = solid(&mut other, 1, 1, Rgb888::RED);
        let root = Group::new().with(tile);

        let result = Compositor::default().render(&Scene::new(), &root, 1, 1);
        assert_eq!(result, Err(ComposeError::UnknownBitmap(tile.bitmap)));
    }

    #[test]
    fn test_frame_bytes_are_big_endian_by_default() {
        let mut scene = Scene::new();
        let tile = solid(&mut scene, 2, 1, Rgb888::RED);
        let root = Group::new().with(tile);

        let mut out = [0u8; 4];
        Compositor::default()
            .render_frame_bytes(&scene, &root, 2, 1, ByteOrder::BigEndian, &mut out)
            .unwrap();
        assert_eq!(out, [0xF8, 0x00, 0xF8, 0x00]);

        Compositor::default()
            .render_frame_bytes(&scene, &root, 2, 1, ByteOrder::LittleEndian, &mut out)
            .unwrap();
        assert_eq!(out, [0x00, 0xF8, 0x00, 0xF8]);
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let scene = Scene::new();
        let mut out = [BLACK; 5];
        assert_eq!(
            Compositor::default().render_frame(&scene, &Group::new(), 2, 2, &mut out),
            Err(ComposeError::BufferSize {
                expected: 4,
                actual: 5
            })
        );
    }
}
