//! Groups pending cells by color into the wire batch.
//!
//! Pure and stateless: groups appear in order of each color's first cell,
//! and pixels keep the input order within their group.

use std::collections::HashMap;

use crate::types::{Batch, CellCoord, Color, PixelGroup};

pub fn group_by_color<'a, I>(entries: I) -> Batch
where
    I: IntoIterator<Item = (&'a CellCoord, &'a Color)>,
{
    let mut groups: Vec<PixelGroup> = Vec::new();
    let mut index: HashMap<&Color, usize> = HashMap::new();

    for (cell, color) in entries {
        let slot = *index.entry(color).or_insert_with(|| {
            groups.push(PixelGroup {
                color: color.clone(),
                pixels: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].pixels.push(cell.to_pair());
    }

    Batch(groups)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn groups_cells_per_color() {
        let mut cells = BTreeMap::new();
        cells.insert(CellCoord::new(0, 0), Color::from("#f00"));
        cells.insert(CellCoord::new(1, 0), Color::from("#f00"));
        cells.insert(CellCoord::new(2, 2), Color::from("#0f0"));

        let batch = group_by_color(&cells);

        assert_eq!(batch.group_count(), 2);
        let red = batch.pixels_for(&Color::from("#f00")).unwrap();
        assert_eq!(red.len(), 2);
        assert!(red.contains(&[0, 0]));
        assert!(red.contains(&[1, 0]));
        assert_eq!(batch.pixels_for(&Color::from("#0f0")), Some(&[[2, 2]][..]));
    }

    #[test]
    fn every_entry_appears_exactly_once() {
        let mut cells = BTreeMap::new();
        let palette = ["#a", "#b", "#c"];
        for x in 0..9 {
            cells.insert(CellCoord::new(x, x % 4), Color::from(palette[x as usize % 3]));
        }

        let batch = group_by_color(&cells);

        assert_eq!(batch.cell_count(), cells.len());
        assert_eq!(batch.group_count(), 3);
        for (cell, color) in &cells {
            let hits: usize = batch
                .groups()
                .iter()
                .map(|g| g.pixels.iter().filter(|p| **p == cell.to_pair()).count())
                .sum();
            assert_eq!(hits, 1);
            assert!(batch.pixels_for(color).unwrap().contains(&cell.to_pair()));
        }
    }

    #[test]
    fn empty_input_gives_empty_batch() {
        let cells: BTreeMap<CellCoord, Color> = BTreeMap::new();
        assert!(group_by_color(&cells).is_empty());
    }

    #[test]
    fn group_order_follows_first_appearance() {
        let mut cells = BTreeMap::new();
        cells.insert(CellCoord::new(0, 0), Color::from("blue"));
        cells.insert(CellCoord::new(1, 0), Color::from("red"));
        cells.insert(CellCoord::new(2, 0), Color::from("blue"));

        let batch = group_by_color(&cells);

        let colors: Vec<_> = batch.groups().iter().map(|g| g.color.as_str()).collect();
        assert_eq!(colors, vec!["blue", "red"]);
        assert_eq!(batch.groups()[0].pixels, vec![[0, 0], [2, 0]]);
    }
}
