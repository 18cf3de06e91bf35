use super::*;

fn point_grid(w: usize, h: usize, x: usize, y: usize) -> Grid<f64> {
    let mut g = Grid::zeros(w, h);
    g.set(x, y, 0, 1.0).unwrap();
    g
}

fn nonzero_cells(g: &Grid<f64>) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for y in 0..g.height() {
        for x in 0..g.width() {
            if g.get(x, y, 0).copied().unwrap_or(0.0) != 0.0 {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn rect_kernels() {
    let k = Spread::new(2, SpreadShape::Rect).kernel();
    assert_eq!((k.width(), k.height()), (3, 3));
    assert!(k.data().iter().all(|v| *v == 1.0));

    let k = Spread::new(2, SpreadShape::Rect).anti_aliased().kernel();
    assert_eq!((k.width(), k.height()), (2, 2));
    assert!(k.data().iter().all(|v| *v == 0.5));

    let k = Spread::new(4, SpreadShape::Rect).anti_aliased().kernel();
    assert_eq!(k.get(1, 1, 0), Some(&1.0));
    assert_eq!(k.get(0, 2, 0), Some(&0.5));
    assert_eq!(k.data().iter().filter(|v| **v == 1.0).count(), 4);

    // Odd factors ignore anti-aliasing.
    let k = Spread::new(3, SpreadShape::Rect).anti_aliased().kernel();
    assert_eq!((k.width(), k.height()), (4, 4));
}

#[test]
fn circle_kernel_drops_corners() {
    let k = Spread::new(2, SpreadShape::Circle).kernel();
    assert_eq!(
        k.data(),
        &[0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0]
    );
}

#[test]
fn zero_factor_is_identity() {
    let g = point_grid(3, 3, 1, 2);
    assert_eq!(Spread::new(0, SpreadShape::Circle).apply(&g).unwrap(), g);
}

#[test]
fn odd_kernel_spreads_symmetrically() {
    let g = point_grid(5, 5, 2, 2);
    let out = Spread::new(2, SpreadShape::Rect).apply(&g).unwrap();
    let expected: Vec<(usize, usize)> = (1..4)
        .flat_map(|y| (1..4).map(move |x| (x, y)))
        .collect();
    assert_eq!(nonzero_cells(&out), expected);
    assert_eq!(out.sum(), 9.0);
}

#[test]
fn even_kernel_spreads_toward_positive_axes() {
    let g = point_grid(5, 5, 2, 2);
    let out = Spread::new(1, SpreadShape::Rect).apply(&g).unwrap();
    assert_eq!(nonzero_cells(&out), vec![(2, 2), (3, 2), (2, 3), (3, 3)]);
}

#[test]
fn border_mass_is_lost_and_shape_kept() {
    let g = point_grid(3, 3, 0, 0);
    let out = Spread::new(2, SpreadShape::Rect).apply(&g).unwrap();
    assert_eq!(out.shape(), g.shape());
    assert_eq!(out.sum(), 4.0);
}

#[test]
fn planes_do_not_mix() {
    let mut g = Grid::stacked(3, 3, 2, 0.0);
    g.set(1, 1, 1, 2.0).unwrap();
    let out = Spread::new(2, SpreadShape::Rect).apply(&g).unwrap();
    assert_eq!(out.plane(0).unwrap().sum(), 0.0);
    assert_eq!(out.plane(1).unwrap().sum(), 18.0);
}
