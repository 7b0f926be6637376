use desk_wm::DeskError;
use desk_wm::constants::{DEPTH_BASE, MAX_LIVE_WINDOWS};
use desk_wm::desktop::{Desktop, Point, Position, PxRect, Size, SlotId, WindowKind};

fn open(desk: &mut Desktop) -> Result<SlotId, DeskError> {
    desk.open_window(&WindowKind::memory_game(), Size::new(450, 485), "Memory Game")
}

#[test]
fn ids_are_kind_plus_sequence() {
    let mut desk = Desktop::default();
    let a = open(&mut desk).unwrap();
    let b = open(&mut desk).unwrap();
    assert_eq!(a.to_string(), "memory_game0");
    assert_eq!(b.to_string(), "memory_game1");
}

#[test]
fn cascade_steps_and_retreats_on_close() {
    let mut desk = Desktop::default();
    let a = open(&mut desk).unwrap();
    let b = open(&mut desk).unwrap();
    assert_eq!(desk.canvas().get(&a).unwrap().position(), Position::new(50, 50));
    assert_eq!(desk.canvas().get(&b).unwrap().position(), Position::new(100, 100));

    desk.close_window(&b).unwrap();
    let c = open(&mut desk).unwrap();
    assert_eq!(desk.canvas().get(&c).unwrap().position(), Position::new(100, 100));
}

#[test]
fn newest_window_is_on_top() {
    let mut desk = Desktop::default();
    let a = open(&mut desk).unwrap();
    let b = open(&mut desk).unwrap();
    assert_eq!(desk.canvas().topmost().map(|w| w.id().clone()), Some(b.clone()));
    assert!(desk.canvas().get(&a).unwrap().depth() >= DEPTH_BASE);

    desk.bring_to_front(&a);
    assert_eq!(desk.canvas().topmost().map(|w| w.id().clone()), Some(a));
}

#[test]
fn capacity_is_enforced_and_released() {
    let mut desk = Desktop::default();
    let mut ids = Vec::new();
    for _ in 0..MAX_LIVE_WINDOWS {
        ids.push(open(&mut desk).unwrap());
    }
    assert_eq!(
        open(&mut desk),
        Err(DeskError::CapacityExceeded {
            cap: MAX_LIVE_WINDOWS
        })
    );

    let closed = desk.close_all();
    assert_eq!(closed.len(), MAX_LIVE_WINDOWS);
    assert_eq!(desk.state().live_windows(), 0);
    assert!(desk.canvas().is_empty());
    assert!(open(&mut desk).is_ok());
}

#[test]
fn drag_moves_window_by_pointer_delta() {
    let mut desk = Desktop::default();
    desk.set_bounds(PxRect::new(0, 0, 1200, 780));
    let id = open(&mut desk).unwrap();

    let payload = desk.begin_drag(&id, Point::new(60, 60)).unwrap();
    assert_eq!((payload.left, payload.top), (-10, -10));
    assert_eq!(payload.to_string(), "memory_game0,-10,-10");
    assert!(desk.canvas().get(&id).unwrap().opacity() < 1.0);

    let placed = desk.drop_at(Point::new(310, 210)).unwrap();
    assert_eq!(placed, Position::new(200, 300));
    assert_eq!(desk.canvas().get(&id).unwrap().opacity(), 1.0);
    assert!(desk.drag().active().is_none());
}

#[test]
fn drop_outside_canvas_leaves_window_in_place() {
    let mut desk = Desktop::default();
    desk.set_bounds(PxRect::new(0, 0, 1200, 780));
    let id = open(&mut desk).unwrap();
    desk.begin_drag(&id, Point::new(60, 60)).unwrap();

    assert_eq!(desk.drop_at(Point::new(5000, 5000)), None);
    assert_eq!(desk.canvas().get(&id).unwrap().position(), Position::new(50, 50));
    assert!(desk.drag().active().is_none());
}

#[test]
fn foreign_transfer_text_is_rejected() {
    let mut desk = Desktop::default();
    desk.set_bounds(PxRect::new(0, 0, 1200, 780));
    let id = open(&mut desk).unwrap();
    desk.begin_drag(&id, Point::new(60, 60)).unwrap();

    assert!(matches!(
        desk.drop_transfer("not a payload", Point::new(100, 100)),
        Err(DeskError::MalformedTransfer(_))
    ));
    assert!(matches!(
        desk.drop_transfer("memory_game9,-10,-10", Point::new(100, 100)),
        Err(DeskError::MalformedTransfer(_))
    ));
    assert!(desk.drag().active().is_some());
}

#[test]
fn closing_dragged_window_ends_the_drag() {
    let mut desk = Desktop::default();
    let id = open(&mut desk).unwrap();
    desk.begin_drag(&id, Point::new(60, 60)).unwrap();
    desk.close_window(&id).unwrap();
    assert!(desk.drag().active().is_none());
    assert_eq!(desk.state().live_windows(), 0);
}
