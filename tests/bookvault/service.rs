//! Request-handling contract tests against an in-memory snapshot.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use bookvault::{Book, BookPatch, BookService, BookStore, HandlerError, InMemorySnapshot, Stats};

use crate::support::{dune, empty_service, new_book};

#[test]
fn create_assigns_first_id_on_empty_store() {
    let service = empty_service();
    let book = service.create(dune()).unwrap();

    assert_eq!(book.id, 1);
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Frank Herbert");
    assert_eq!(book.price, 12.5);
    assert_eq!(book.genre, "Sci-Fi");
}

#[test]
fn create_trims_title_and_author() {
    let service = empty_service();
    let book = service
        .create(new_book("   The Dispossessed ", "\tUrsula K. Le Guin  "))
        .unwrap();

    assert_eq!(book.title, "The Dispossessed");
    assert_eq!(book.author, "Ursula K. Le Guin");
    assert_eq!(service.get_by_id(book.id as i64).unwrap(), book);
}

#[test]
fn create_duplicate_is_conflict() {
    let service = empty_service();
    service.create(dune()).unwrap();

    let err = service.create(dune()).unwrap_err();
    assert_eq!(err.status_code(), 409);
    assert_eq!(err.to_string(), "Book 'Dune' by Frank Herbert already exists.");

    let err = service.create(new_book("  DUNE ", "frank herbert")).unwrap_err();
    assert!(matches!(err, HandlerError::Conflict(_)));
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn create_rejects_invalid_fields() {
    let service = empty_service();

    let mut input = dune();
    input.price = -1.0;
    assert!(matches!(service.create(input), Err(HandlerError::InvalidInput(_))));

    let mut input = dune();
    input.genre = "  ".to_string();
    assert!(matches!(service.create(input), Err(HandlerError::InvalidInput(_))));

    let err = service.create(new_book("D", "Frank Herbert")).unwrap_err();
    assert_eq!(err.to_string(), "Title must be at least 2 characters long.");

    assert!(service.list().unwrap().is_empty());
}

#[test]
fn ids_never_repeat_across_creates() {
    let service = empty_service();
    let mut seen = HashSet::new();

    for n in 0..20 {
        let book = service
            .create(new_book(&format!("Volume {}", n), "Anon Ymous"))
            .unwrap();
        assert!(seen.insert(book.id));
        assert_eq!(book.id, n + 1);
    }
}

#[test]
fn next_id_follows_the_largest_remaining_id() {
    let service = empty_service();
    service.create(new_book("First", "Author One")).unwrap();
    service.create(new_book("Second", "Author One")).unwrap();
    service.create(new_book("Third", "Author One")).unwrap();
    service.delete(1).unwrap();

    let book = service.create(new_book("Fourth", "Author One")).unwrap();
    assert_eq!(book.id, 4);
}

#[test]
fn update_price_only_keeps_other_fields() {
    let service = empty_service();
    let created = service.create(dune()).unwrap();

    let updated = service
        .update(
            created.id as i64,
            BookPatch {
                price: Some(20.0),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.price, 20.0);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.author, created.author);
    assert_eq!(updated.genre, created.genre);
}

#[test]
fn update_with_same_pair_is_not_a_self_conflict() {
    let service = empty_service();
    let created = service.create(dune()).unwrap();

    let updated = service
        .update(
            created.id as i64,
            BookPatch {
                title: Some(" dune ".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.title, "dune");
}

#[test]
fn update_into_another_books_pair_is_conflict() {
    let service = empty_service();
    service.create(dune()).unwrap();
    let other = service.create(new_book("Children of Dune", "Frank Herbert")).unwrap();

    let err = service
        .update(
            other.id as i64,
            BookPatch {
                title: Some("DUNE".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, HandlerError::Conflict(_)));
    assert_eq!(
        service.get_by_id(other.id as i64).unwrap().title,
        "Children of Dune"
    );
}

#[test]
fn update_with_negative_price_is_invalid_input() {
    let service = empty_service();
    service.create(dune()).unwrap();

    let err = service
        .update(
            1,
            BookPatch {
                price: Some(-1.0),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert!(matches!(err, HandlerError::InvalidInput(_)));
    assert_eq!(service.get_by_id(1).unwrap().price, 12.5);
}

#[test]
fn update_missing_book_is_not_found() {
    let service = empty_service();
    let err = service.update(5, BookPatch::default()).unwrap_err();
    assert_eq!(err.to_string(), "Book with ID 5 not found.");
}

#[test]
fn delete_then_get_is_not_found() {
    let service = empty_service();
    service.create(dune()).unwrap();

    service.delete(1).unwrap();
    assert!(matches!(service.get_by_id(1), Err(HandlerError::NotFound(_))));
    assert!(matches!(service.delete(1), Err(HandlerError::NotFound(_))));
}

#[test]
fn delete_of_unknown_id_is_not_found() {
    let service = empty_service();
    let err = service.delete(99).unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn stats_on_empty_collection() {
    let stats = empty_service().stats().unwrap();
    assert_eq!(
        stats,
        Stats {
            total_books: 0,
            total_authors: 0,
            authors: vec![],
        }
    );
}

#[test]
fn stats_lists_distinct_sorted_authors() {
    let service = empty_service();
    service.create(new_book("Neuromancer", "William Gibson")).unwrap();
    service.create(new_book("Count Zero", "William Gibson")).unwrap();
    service.create(new_book("Hyperion", "Dan Simmons")).unwrap();

    let stats = service.stats().unwrap();
    assert_eq!(stats.total_books, 3);
    assert_eq!(stats.total_authors, 2);
    assert_eq!(stats.authors, vec!["Dan Simmons", "William Gibson"]);
}

#[test]
fn random_pick_only_returns_stored_books() {
    let service = empty_service();
    let stored: Vec<_> = ["Ubik", "Valis", "Radio Free Albemuth"]
        .iter()
        .map(|t| service.create(new_book(t, "Philip K. Dick")).unwrap())
        .collect();

    for _ in 0..25 {
        let picked = service.random_pick().unwrap();
        assert!(stored.contains(&picked));
    }
}

#[test]
fn list_returns_books_in_id_order() {
    let service = empty_service();
    service.create(new_book("Alpha", "Writer One")).unwrap();
    service.create(new_book("Beta", "Writer Two")).unwrap();

    let ids: Vec<u64> = service.list().unwrap().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn create_never_overwrites_the_largest_id() {
    let top = Book {
        id: u64::MAX,
        title: "Top".to_string(),
        author: "Writer".to_string(),
        price: 1.0,
        genre: "Fiction".to_string(),
    };
    let snapshot = InMemorySnapshot::with_books(&[top.clone()]).unwrap();
    let service = BookService::new(BookStore::open(snapshot.clone()));

    let err = service.create(new_book("Other", "Writer")).unwrap_err();
    assert_eq!(err.status_code(), 500);

    assert_eq!(service.list().unwrap(), vec![top.clone()]);
    assert_eq!(snapshot.saves(), 0);
}

#[test]
fn concurrent_duplicate_creates_admit_exactly_one() {
    const WRITERS: usize = 16;
    let service = Arc::new(empty_service());

    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.create(new_book("Dune", "Frank Herbert")))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let created: Vec<&Book> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(HandlerError::Conflict(_))))
        .count();
    assert_eq!(created.len(), 1);
    assert_eq!(conflicts, WRITERS - 1);
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn concurrent_distinct_creates_get_distinct_ids() {
    const WRITERS: u64 = 16;
    let service = Arc::new(empty_service());

    let handles: Vec<_> = (0..WRITERS)
        .map(|n| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                service
                    .create(new_book(&format!("Volume {}", n), "Anon Ymous"))
                    .unwrap()
                    .id
            })
        })
        .collect();
    let ids: HashSet<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(ids, (1..=WRITERS).collect::<HashSet<_>>());
}
