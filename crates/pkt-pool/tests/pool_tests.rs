use std::rc::Rc;

use pkt_pool::Pool;

#[test]
fn claim_until_exhausted_then_recover() {
    let pool: Pool<u32, 3> = Pool::new();
    assert_eq!(pool.capacity(), 3);
    assert_eq!(pool.free_count(), 3);

    let a = pool.claim(10).unwrap();
    let b = pool.claim(20).unwrap();
    let c = pool.claim(30).unwrap();
    assert_eq!(pool.free_count(), 0);

    // Exhausted: the initializer is handed back, nothing is lost.
    assert_eq!(pool.claim(40).unwrap_err(), 40);

    drop(b);
    assert_eq!(pool.free_count(), 1);
    let d = pool.claim(50).unwrap();
    assert_eq!(*d, 50);

    assert_eq!((*a, *c), (10, 30));
}

#[test]
fn boxes_are_independent_and_mutable() {
    let pool: Pool<Vec<u8>, 2> = Pool::new();

    let mut a = pool.claim(vec![1]).unwrap();
    let mut b = pool.claim(vec![2]).unwrap();
    a.push(3);
    b.push(4);

    assert_eq!(*a, vec![1, 3]);
    assert_eq!(*b, vec![2, 4]);
}

#[test]
fn drop_runs_the_destructor_exactly_once() {
    let value = Rc::new(());
    let pool: Pool<Rc<()>, 2> = Pool::new();

    let boxed = pool.claim(value.clone()).unwrap();
    assert_eq!(Rc::strong_count(&value), 2);
    drop(boxed);
    assert_eq!(Rc::strong_count(&value), 1);
}

#[test]
fn into_inner_moves_the_value_out() {
    let value = Rc::new(());
    let pool: Pool<Rc<()>, 1> = Pool::new();

    let boxed = pool.claim(value.clone()).unwrap();
    let recovered = boxed.into_inner();
    assert_eq!(pool.free_count(), 1);
    assert_eq!(Rc::strong_count(&value), 2);
    drop(recovered);
    assert_eq!(Rc::strong_count(&value), 1);

    // The slot is reusable after the move-out.
    let again = pool.claim(value.clone()).unwrap();
    assert_eq!(Rc::strong_count(&value), 2);
    drop(again);
}

#[test]
fn slots_recycle_without_cross_talk() {
    let pool: Pool<[u8; 8], 1> = Pool::new();

    let first = pool.claim([0xFF; 8]).unwrap();
    drop(first);
    let second = pool.claim([0x00; 8]).unwrap();
    assert_eq!(*second, [0x00; 8]);
}

#[test]
fn pool_is_usable_from_a_static() {
    static POOL: Pool<u8, 4> = Pool::new();

    let a = POOL.claim(1).unwrap();
    let b = POOL.claim(2).unwrap();
    assert_eq!(POOL.free_count(), 2);
    drop((a, b));
    assert_eq!(POOL.free_count(), 4);
}

#[test]
fn full_width_pool_uses_all_32_slots() {
    let pool: Pool<usize, 32> = Pool::new();

    let boxes: Vec<_> =
        (0..32).map(|i| pool.claim(i).unwrap()).collect();
    assert_eq!(pool.free_count(), 0);
    assert_eq!(pool.claim(99).unwrap_err(), 99);

    for (i, boxed) in boxes.iter().enumerate() {
        assert_eq!(**boxed, i);
    }
    drop(boxes);
    assert_eq!(pool.free_count(), 32);
}
