use chamfermatch::{BinaryView, Bitmap, ChamferMatchError, ChamferMetric, ChamferTransform, DistanceTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_bitmap(width: usize, height: usize, density: f64, seed: u64) -> Bitmap {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bitmap = Bitmap::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            if rng.random_bool(density) {
                bitmap.set(x, y, true);
            }
        }
    }
    bitmap
}

#[test]
fn foreground_cells_are_exactly_zero() {
    let bitmap = random_bitmap(64, 48, 0.15, 11);
    let table = ChamferTransform::new()
        .compute_to_foreground(bitmap.view())
        .unwrap();
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            if bitmap.is_foreground(x, y) {
                assert_eq!(table.value(x, y), 0, "foreground at ({x}, {y})");
            } else {
                assert!(table.value(x, y) > 0, "background at ({x}, {y})");
            }
        }
    }
}

#[test]
fn neighbors_differ_by_at_most_one_step_weight() {
    let metric = ChamferMetric::default();
    let bitmap = random_bitmap(40, 40, 0.05, 23);
    let table = ChamferTransform::new()
        .compute_to_foreground(bitmap.view())
        .unwrap();

    for y in 0..40usize {
        for x in 0..40usize {
            let here = table.value(x, y);
            for (dx, dy, weight) in [
                (1i64, 0i64, metric.ortho),
                (-1, 0, metric.ortho),
                (0, 1, metric.ortho),
                (0, -1, metric.ortho),
                (1, 1, metric.diag),
                (1, -1, metric.diag),
                (-1, 1, metric.diag),
                (-1, -1, metric.diag),
            ] {
                let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                if nx < 0 || ny < 0 || nx >= 40 || ny >= 40 {
                    continue;
                }
                let neighbor = table.value(nx as usize, ny as usize);
                assert!(
                    here <= neighbor.saturating_add(weight),
                    "({x}, {y})={here} vs neighbor ({nx}, {ny})={neighbor}"
                );
            }
        }
    }
}

#[test]
fn single_foreground_pixel_gives_exact_chamfer_values() {
    let mut bitmap = Bitmap::new(7, 7).unwrap();
    bitmap.set(3, 3, true);
    let table = ChamferTransform::new()
        .compute_to_foreground(bitmap.view())
        .unwrap();

    assert_eq!(table.normalizer(), 3);
    assert_eq!(table.value(3, 3), 0);
    assert_eq!(table.value(4, 3), 3);
    assert_eq!(table.value(2, 3), 3);
    assert_eq!(table.value(4, 4), 4);
    assert_eq!(table.value(2, 2), 4);
    assert_eq!(table.value(5, 3), 6);
    assert_eq!(table.value(5, 4), 7);
    assert_eq!(table.value(5, 5), 8);
    assert_eq!(table.value(6, 3), 9);
    assert_eq!(table.value(0, 0), 3 * 4);
}

#[test]
fn all_background_image_saturates_at_the_sentinel() {
    let bitmap = Bitmap::new(9, 5).unwrap();
    let table = ChamferTransform::new()
        .compute_to_foreground(bitmap.view())
        .unwrap();
    for &value in table.values() {
        assert_eq!(value, DistanceTable::UNREACHABLE);
    }
}

#[test]
fn background_transform_mirrors_foreground_of_inverted_image() {
    let bitmap = random_bitmap(32, 24, 0.3, 5);
    let mut inverted = Bitmap::new(32, 24).unwrap();
    for y in 0..24 {
        for x in 0..32 {
            inverted.set(x, y, !bitmap.is_foreground(x, y));
        }
    }

    let transform = ChamferTransform::new();
    let to_back = transform.compute_to_background(bitmap.view()).unwrap();
    let to_fore = transform.compute_to_foreground(inverted.view()).unwrap();
    assert_eq!(to_back.values(), to_fore.values());
}

#[test]
fn repeated_runs_are_bit_identical() {
    let bitmap = random_bitmap(50, 33, 0.1, 42);
    let transform = ChamferTransform::new();
    let first = transform.compute_to_foreground(bitmap.view()).unwrap();
    let second = transform.compute_to_foreground(bitmap.view()).unwrap();
    assert_eq!(first.values(), second.values());
}

#[test]
fn zero_sized_images_are_rejected() {
    let err = BinaryView::from_slice(&[], 0, 4).err().unwrap();
    assert_eq!(err, ChamferMatchError::InvalidImage { width: 0, height: 4 });

    let err = BinaryView::from_slice(&[], 4, 0).err().unwrap();
    assert_eq!(err, ChamferMatchError::InvalidImage { width: 4, height: 0 });
}

#[test]
fn custom_metric_scales_distances() {
    let mut bitmap = Bitmap::new(5, 1).unwrap();
    bitmap.set(0, 0, true);
    let transform = ChamferTransform::with_metric(ChamferMetric { ortho: 5, diag: 7 });
    let table = transform.compute_to_foreground(bitmap.view()).unwrap();
    assert_eq!(table.normalizer(), 5);
    assert_eq!(table.value(3, 0), 15);
}

#[test]
fn dump_prints_one_row_per_image_row() {
    let mut bitmap = Bitmap::new(3, 2).unwrap();
    bitmap.set(1, 0, true);
    let table = ChamferTransform::new()
        .compute_to_foreground(bitmap.view())
        .unwrap();
    let dump = table.dump();
    assert!(dump.starts_with("3x2 distances"));
    assert_eq!(dump.lines().count(), 3);
    assert!(dump.contains("    0"));
}
