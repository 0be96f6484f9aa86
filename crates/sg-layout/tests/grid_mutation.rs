// ABOUTME: Removal, move, resize and container layout behaviour of the grid.
// ABOUTME: Covers collapse and root normalization, redistribution and constraint saturation.

mod common;

use common::{flexible, ids, rendered, rendered_at, snapshot, v, view, Handle, Ids};
use sg_layout::{
    Fit, GridError, GridOptions, GridTree, LocationFault, Orientation, ResizeOutcome, Size,
    SizeConstraints, ViewTree,
};

fn grid(width: u32, height: u32) -> GridTree<Handle> {
    GridTree::new(Size::new(width, height), GridOptions::default())
}

fn heights(grid: &GridTree<Handle>, count: usize) -> Vec<u32> {
    (0..count)
        .map(|i| grid.view_size(&[i]).unwrap().height)
        .collect()
}

/// Three flexible views stacked in an 800x600 grid: [330, 170, 100]
fn three_rows() -> (GridTree<Handle>, [Handle; 3]) {
    let mut grid = grid(800, 600);
    let views = [flexible(1), flexible(2), flexible(3)];
    grid.add_view(views[0].clone(), 200, &[0]).unwrap();
    grid.add_view(views[1].clone(), 200, &[1]).unwrap();
    grid.add_view(views[2].clone(), 100, &[2]).unwrap();
    (grid, views)
}

#[test]
fn insertion_takes_space_by_slack() {
    let (grid, _) = three_rows();
    assert_eq!(heights(&grid, 3), vec![330, 170, 100]);
}

#[test]
fn remove_redistributes_proportionally() {
    let (mut grid, views) = three_rows();

    let removed = grid.remove_view(&[1]).unwrap();
    assert!(matches!(&removed, ViewTree::Leaf(handle) if handle.borrow().id == 2));

    assert_eq!(ids(&grid), vec![v(1), v(3)]);
    assert_eq!(heights(&grid, 2), vec![461, 139]);
    assert_eq!(rendered(&views[2]), Some((800, 139)));
    assert_eq!(rendered_at(&views[2]), Some((0, 461)));
}

#[test]
fn remove_collapses_single_view_split() {
    let mut grid = grid(800, 600);
    let a = flexible(1);
    let c = flexible(3);
    grid.add_view(a.clone(), 200, &[0]).unwrap();
    grid.add_view(flexible(2), 200, &[1]).unwrap();
    grid.add_view(c.clone(), 200, &[1, 1]).unwrap();
    assert_eq!(ids(&grid), vec![v(1), Ids::B(vec![v(2), v(3)])]);

    grid.remove_view(&[1, 0]).unwrap();

    assert_eq!(ids(&grid), vec![v(1), v(3)]);
    assert_eq!(rendered(&a), Some((800, 400)));
    assert_eq!(rendered(&c), Some((800, 200)));
    assert_eq!(rendered_at(&c), Some((0, 400)));
}

#[test]
fn remove_splices_lone_split_into_grandparent() {
    let mut grid = grid(800, 600);
    let (c, d) = (flexible(3), flexible(4));
    grid.add_view(flexible(1), 200, &[0]).unwrap();
    grid.add_view(flexible(2), 200, &[1]).unwrap();
    grid.add_view(c.clone(), 200, &[1, 1]).unwrap();
    grid.add_view(d.clone(), 150, &[1, 1, 1]).unwrap();
    assert_eq!(
        ids(&grid),
        vec![v(1), Ids::B(vec![v(2), Ids::B(vec![v(3), v(4)])])]
    );

    grid.remove_view(&[1, 0]).unwrap();

    assert_eq!(ids(&grid), vec![v(1), v(3), v(4)]);
    assert_eq!(heights(&grid, 3), vec![400, 50, 150]);
    assert_eq!(rendered(&c), Some((800, 50)));
    assert_eq!(rendered(&d), Some((800, 150)));
    assert_eq!(rendered_at(&d), Some((0, 450)));
}

#[test]
fn remove_returns_whole_subtrees() {
    let mut grid = grid(800, 600);
    grid.add_view(flexible(1), 200, &[0]).unwrap();
    grid.add_view(flexible(2), 200, &[1]).unwrap();
    grid.add_view(flexible(3), 200, &[1, 1]).unwrap();

    let removed = grid.remove_view(&[1]).unwrap();
    let removed_ids: Vec<u32> = removed.leaves().iter().map(|h| h.borrow().id).collect();
    assert_eq!(removed_ids, vec![2, 3]);
    assert!(matches!(
        removed,
        ViewTree::Branch {
            orientation: Orientation::Horizontal,
            ..
        }
    ));
    assert_eq!(ids(&grid), vec![v(1)]);
    assert_eq!(grid.view_size(&[0]).unwrap(), Size::new(800, 600));
}

#[test]
fn root_left_with_one_split_is_replaced_by_it() {
    let mut grid = grid(800, 600);
    let (b, c) = (flexible(2), flexible(3));
    grid.add_view(flexible(1), 200, &[0]).unwrap();
    grid.add_view(b.clone(), 200, &[1]).unwrap();
    grid.add_view(c.clone(), 200, &[1, 1]).unwrap();
    assert_eq!(ids(&grid), vec![v(1), Ids::B(vec![v(2), v(3)])]);

    grid.remove_view(&[0]).unwrap();

    assert_eq!(ids(&grid), vec![v(2), v(3)]);
    assert_eq!(grid.orientation_at(&[]).unwrap(), Orientation::Horizontal);
    assert_eq!(grid.view_size(&[0]).unwrap(), Size::new(600, 600));
    assert_eq!(grid.view_size(&[1]).unwrap(), Size::new(200, 600));
    assert_eq!(rendered(&b), Some((600, 600)));
    assert_eq!(rendered_at(&c), Some((600, 0)));

    grid.layout(400, 300).unwrap();
    assert_eq!(rendered(&b), Some((300, 300)));
    assert_eq!(rendered(&c), Some((100, 300)));
}

#[test]
fn move_out_of_root_promotes_remaining_split() {
    let mut grid = grid(800, 600);
    grid.add_view(flexible(1), 200, &[0]).unwrap();
    grid.add_view(flexible(2), 200, &[1]).unwrap();
    grid.add_view(flexible(3), 200, &[1, 1]).unwrap();

    grid.move_view(&[0], &[1]).unwrap();

    assert_eq!(ids(&grid), vec![v(2), v(1), v(3)]);
    assert_eq!(grid.orientation_at(&[]).unwrap(), Orientation::Horizontal);
    let widths: u32 = (0..3).map(|i| grid.view_size(&[i]).unwrap().width).sum();
    assert_eq!(widths, 800);
}

#[test]
fn root_cannot_be_removed() {
    let (mut grid, _) = three_rows();
    assert_eq!(grid.remove_view(&[]).unwrap_err(), GridError::CannotRemoveRoot);
    assert_eq!(grid.len(), 3);
}

#[test]
fn remove_rejects_bad_locations() {
    let (mut grid, _) = three_rows();
    let before = snapshot(&grid);

    let err = grid.remove_view(&[3]).unwrap_err();
    assert_eq!(
        err.location_fault(),
        Some(LocationFault::IndexOutOfBounds { depth: 0, index: 3, len: 3 })
    );
    let err = grid.remove_view(&[0, 0]).unwrap_err();
    assert_eq!(err.location_fault(), Some(LocationFault::NotABranch { depth: 1 }));

    assert_eq!(snapshot(&grid), before);
}

#[test]
fn removing_last_view_leaves_empty_root() {
    let mut grid = grid(800, 600);
    grid.add_view(flexible(1), 200, &[0]).unwrap();
    grid.remove_view(&[0]).unwrap();

    assert!(grid.is_empty());
    assert_eq!(grid.orientation_at(&[]).unwrap(), Orientation::Vertical);
    assert!(grid.remove_view(&[0]).is_err());

    let b = flexible(2);
    grid.add_view(b.clone(), 100, &[0]).unwrap();
    assert_eq!(rendered(&b), Some((800, 600)));
}

#[test]
fn move_round_trip_restores_order() {
    let (mut grid, _) = three_rows();

    grid.move_view(&[0], &[2]).unwrap();
    assert_eq!(ids(&grid), vec![v(2), v(3), v(1)]);
    assert_eq!(heights(&grid, 3).iter().sum::<u32>(), 600);
    assert_eq!(heights(&grid, 3)[2], 330);

    grid.move_view(&[2], &[0]).unwrap();
    assert_eq!(ids(&grid), vec![v(1), v(2), v(3)]);
    assert_eq!(heights(&grid, 3).iter().sum::<u32>(), 600);
}

#[test]
fn move_reads_target_after_removal() {
    let (mut grid, _) = three_rows();

    grid.move_view(&[2], &[0, 1]).unwrap();

    assert_eq!(ids(&grid), vec![Ids::B(vec![v(1), v(3)]), v(2)]);
    assert_eq!(grid.orientation_at(&[0]).unwrap(), Orientation::Horizontal);
    let row = grid.view_size(&[0]).unwrap();
    let left = grid.view_size(&[0, 0]).unwrap();
    let right = grid.view_size(&[0, 1]).unwrap();
    assert_eq!(left.width + right.width, 800);
    assert_eq!((left.height, right.height), (row.height, row.height));
}

#[test]
fn failed_move_changes_nothing() {
    let (mut grid, views) = three_rows();
    let before = snapshot(&grid);
    let layouts = views[0].borrow().layouts;

    assert!(grid.move_view(&[0], &[5]).is_err());
    assert!(grid.move_view(&[4], &[0]).is_err());
    assert!(grid.move_view(&[0], &[0, 0, 0]).is_err());
    assert_eq!(grid.move_view(&[], &[0]).unwrap_err(), GridError::CannotRemoveRoot);

    // [3] exists before the move but not once [0] is taken out.
    let err = grid.move_view(&[0], &[3]).unwrap_err();
    assert_eq!(
        err.location_fault(),
        Some(LocationFault::IndexOutOfBounds { depth: 0, index: 3, len: 2 })
    );

    assert_eq!(snapshot(&grid), before);
    assert_eq!(views[0].borrow().layouts, layouts);
}

#[test]
fn moved_split_is_flipped_to_alternate() {
    let mut grid = grid(800, 600);
    grid.add_view(flexible(1), 200, &[0]).unwrap();
    grid.add_view(flexible(2), 200, &[1]).unwrap();
    grid.add_view(flexible(3), 200, &[1, 1]).unwrap();
    assert_eq!(grid.orientation_at(&[1]).unwrap(), Orientation::Horizontal);

    grid.move_view(&[1], &[0, 1]).unwrap();

    assert_eq!(ids(&grid), vec![Ids::B(vec![v(1), Ids::B(vec![v(2), v(3)])])]);
    assert_eq!(grid.orientation_at(&[0]).unwrap(), Orientation::Horizontal);
    assert_eq!(grid.orientation_at(&[0, 1]).unwrap(), Orientation::Vertical);

    let column = grid.view_size(&[0, 1]).unwrap();
    let top = grid.view_size(&[0, 1, 0]).unwrap();
    let bottom = grid.view_size(&[0, 1, 1]).unwrap();
    assert_eq!(column.height, 600);
    assert_eq!(top.height + bottom.height, 600);
    assert_eq!((top.width, bottom.width), (column.width, column.width));
}

#[test]
fn resize_trades_with_following_sibling() {
    let (mut grid, _) = three_rows();

    let outcome = grid.resize_view(&[0], 300).unwrap();
    assert_eq!(outcome, ResizeOutcome { requested: -30, realized: -30 });
    assert_eq!(heights(&grid, 3), vec![300, 200, 100]);
}

#[test]
fn resize_saturates_at_neighbour_minimums() {
    let (mut grid, views) = three_rows();
    grid.resize_view(&[0], 300).unwrap();

    let outcome = grid.resize_view(&[0], 600).unwrap();
    assert!(outcome.is_saturated());
    assert_eq!(outcome, ResizeOutcome { requested: 300, realized: 200 });
    assert_eq!(heights(&grid, 3), vec![500, 50, 50]);
    assert_eq!(rendered(&views[2]), Some((800, 50)));
    assert_eq!(rendered_at(&views[2]), Some((0, 550)));
}

#[test]
fn resizing_last_view_takes_from_preceding() {
    let (mut grid, _) = three_rows();
    grid.resize_view(&[0], 300).unwrap();
    grid.resize_view(&[0], 600).unwrap();

    let outcome = grid.resize_view(&[2], 200).unwrap();
    assert_eq!(outcome.realized, 150);
    assert_eq!(heights(&grid, 3), vec![350, 50, 200]);
}

#[test]
fn resizing_split_pushes_cross_size_down() {
    let mut grid = grid(800, 600);
    let (b, c) = (flexible(2), flexible(3));
    grid.add_view(flexible(1), 200, &[0]).unwrap();
    grid.add_view(b.clone(), 200, &[1]).unwrap();
    grid.add_view(c.clone(), 200, &[1, 1]).unwrap();

    let outcome = grid.resize_view(&[1], 300).unwrap();

    assert_eq!(outcome.realized, 100);
    assert_eq!(grid.view_size(&[1]).unwrap(), Size::new(800, 300));
    assert_eq!(rendered(&b), Some((600, 300)));
    assert_eq!(rendered(&c), Some((200, 300)));
    assert_eq!(rendered_at(&c), Some((600, 300)));
}

#[test]
fn resize_rejects_bad_locations() {
    let (mut grid, _) = three_rows();
    assert!(grid.resize_view(&[], 100).is_err());
    assert!(grid.resize_view(&[3], 100).is_err());
    assert_eq!(heights(&grid, 3), vec![330, 170, 100]);
}

#[test]
fn proportional_container_layout() {
    let mut grid = grid(800, 600);
    grid.add_view(flexible(1), 200, &[0]).unwrap();
    grid.add_view(flexible(2), 200, &[1]).unwrap();
    assert_eq!(heights(&grid, 2), vec![400, 200]);

    assert_eq!(grid.layout(800, 900).unwrap(), Fit::Exact);
    assert_eq!(heights(&grid, 2), vec![600, 300]);

    assert_eq!(grid.layout(800, 300).unwrap(), Fit::Exact);
    assert_eq!(heights(&grid, 2), vec![200, 100]);
}

#[test]
fn last_view_absorbs_without_proportional_layout() {
    let options = GridOptions {
        proportional_layout: false,
    };
    let mut grid: GridTree<Handle> = GridTree::new(Size::new(800, 600), options);
    grid.add_view(flexible(1), 200, &[0]).unwrap();
    grid.add_view(flexible(2), 200, &[1]).unwrap();
    assert_eq!(heights(&grid, 2), vec![400, 200]);

    grid.layout(800, 900).unwrap();
    assert_eq!(heights(&grid, 2), vec![400, 500]);

    grid.layout(800, 300).unwrap();
    assert_eq!(heights(&grid, 2), vec![250, 50]);
}

#[test]
fn undersized_container_saturates() {
    let mut grid = grid(800, 600);
    grid.add_view(flexible(1), 200, &[0]).unwrap();
    grid.add_view(flexible(2), 200, &[1]).unwrap();

    let fit = grid.layout(800, 80).unwrap();

    assert_eq!(fit, Fit::Saturated { unresolved: -20 });
    assert_eq!(heights(&grid, 2), vec![50, 50]);
    assert_eq!(grid.size().unwrap(), Size::new(800, 80));
}

#[test]
fn dispose_hands_back_panels_once() {
    let (mut grid, _) = three_rows();

    let panels = grid.dispose();
    let order: Vec<u32> = panels.iter().map(|h| h.borrow().id).collect();
    assert_eq!(order, vec![1, 2, 3]);

    assert!(grid.is_disposed());
    assert!(grid.dispose().is_empty());
    assert_eq!(grid.len(), 0);
    assert_eq!(grid.layout(800, 600).unwrap_err(), GridError::Disposed);
    assert_eq!(
        grid.add_view(flexible(4), 100, &[0]).unwrap_err(),
        GridError::Disposed
    );
    assert!(matches!(grid.views(), Err(GridError::Disposed)));
}

#[test]
fn cross_axis_bounds_report_saturation() {
    let mut grid = grid(800, 600);
    let narrow = view(1, SizeConstraints::bounded(0, 100, 0, 1000));

    let fit = grid.add_view(narrow.clone(), 200, &[0]).unwrap();

    assert_eq!(fit, Fit::Saturated { unresolved: 700 });
    assert_eq!(rendered(&narrow), Some((800, 600)));

    assert_eq!(grid.layout(100, 600).unwrap(), Fit::Exact);
    assert_eq!(rendered(&narrow), Some((100, 600)));
}

#[test]
fn cross_axis_minimum_reports_shortfall() {
    let mut grid = grid(800, 600);
    let wide = view(1, SizeConstraints::flexible(900, 0));

    let fit = grid.add_view(wide.clone(), 200, &[0]).unwrap();

    assert_eq!(fit, Fit::Saturated { unresolved: -100 });
    assert_eq!(rendered(&wide), Some((800, 600)));
}
