use super::*;

#[test]
fn test_heap_clone_shares_allocation() {
    let h1 = Heap::new(vec![1, 2, 3]);
    let h2 = h1.clone();
    assert!(Heap::ptr_eq(&h1, &h2));
    assert_eq!(Heap::share_count(&h1), 2);
}

#[test]
fn test_make_mut_unshares() {
    let original = Heap::new(vec![1, 2, 3]);
    let mut copy = original.clone();

    Heap::make_mut(&mut copy).push(4);

    assert_eq!(*original, vec![1, 2, 3]);
    assert_eq!(*copy, vec![1, 2, 3, 4]);
    assert!(!Heap::ptr_eq(&original, &copy));
}

#[test]
fn test_make_mut_unique_mutates_in_place() {
    let mut only = Heap::new(String::from("abc"));
    let before = Arc::as_ptr(&only.0);
    Heap::make_mut(&mut only).push('d');
    assert_eq!(before, Arc::as_ptr(&only.0));
    assert_eq!(&*only, "abcd");
}

#[test]
fn test_heap_eq() {
    let h1 = Heap::new("hello".to_string());
    let h2 = Heap::new("hello".to_string());
    let h3 = Heap::new("world".to_string());
    assert_eq!(h1, h2);
    assert_ne!(h1, h3);
}
