use super::*;
use crate::db::transactions::set_transaction_failpoint;
use crate::repository::TransactionRunner;
use crate::test_support::{seed_file, seed_menu, seed_store, setup_temp_db};

fn insert(db: &crate::Database, review: &Review, menus: &[String], files: &[String]) {
    db.start_transaction(|txn| db.reviews.insert_in_txn(txn, review, menus, files))
        .expect("insert review");
}

#[test]
fn insert_writes_row_indexes_and_links() {
    let (db, _temp) = setup_temp_db();
    let store = seed_store(&db, "dumpling house");
    let menu = seed_menu(&db, &store, "xiao long bao");
    let file = seed_file(&db, &store, "dumplings/1.jpg");
    let review = Review::new(store.id.clone(), "alice".to_string(), 5);

    insert(&db, &review, &[menu.id.clone()], &[file.id.clone()]);

    let view = db
        .reviews
        .get_view(&review.id, None)
        .expect("get view")
        .expect("review present");
    assert_eq!(view.review, review);
    assert_eq!(view.menu_ids, vec![menu.id]);
    assert_eq!(view.file_ids, vec![file.id]);
    assert_eq!(view.likes_count, 0);
    assert!(!view.liked_by_me);
    assert_eq!(db.reviews.count_by_store(&store.id).expect("count"), 1);
    assert_eq!(db.reviews.count_links(&review.id).expect("links"), 2);

    let by_user = db.reviews.list_by_user("alice", None).expect("by user");
    assert_eq!(by_user.len(), 1);
}

#[test]
fn duplicate_review_id_is_rejected_without_new_rows() {
    let (db, _temp) = setup_temp_db();
    let store = seed_store(&db, "diner");
    let review = Review::new(store.id.clone(), "bob".to_string(), 4);
    insert(&db, &review, &[], &[]);

    let err = db
        .start_transaction(|txn| db.reviews.insert_in_txn(txn, &review, &[], &[]))
        .expect_err("duplicate id");
    assert!(matches!(err, AppError::AlreadyExists(_)));
    assert_eq!(db.reviews.count_by_store(&store.id).expect("count"), 1);
}

#[test]
fn failpoint_after_row_insert_rolls_back_everything() {
    let (db, _temp) = setup_temp_db();
    let store = seed_store(&db, "pho spot");
    let menu = seed_menu(&db, &store, "pho tai");
    let review = Review::new(store.id.clone(), "carol".to_string(), 3);

    set_transaction_failpoint(Some(TransactionFailpoint::ReviewAfterRowInsertOnce));
    let result = db.start_transaction(|txn| {
        db.reviews
            .insert_in_txn(txn, &review, &[menu.id.clone()], &[])
    });
    assert!(result.is_err());

    assert!(db.reviews.get(&review.id).expect("get").is_none());
    assert_eq!(db.reviews.count_by_store(&store.id).expect("count"), 0);
    assert_eq!(db.reviews.count_links(&review.id).expect("links"), 0);
    assert!(db.reviews.list_by_user("carol", None).expect("by user").is_empty());
}

#[test]
fn failpoint_between_link_groups_leaves_no_partial_links() {
    let (db, _temp) = setup_temp_db();
    let store = seed_store(&db, "bistro");
    let menu = seed_menu(&db, &store, "steak frites");
    let file = seed_file(&db, &store, "bistro/steak.jpg");
    let review = Review::new(store.id.clone(), "dan".to_string(), 4);

    set_transaction_failpoint(Some(TransactionFailpoint::ReviewAfterMenuLinksOnce));
    let result = db.start_transaction(|txn| {
        db.reviews
            .insert_in_txn(txn, &review, &[menu.id.clone()], &[file.id.clone()])
    });
    assert!(result.is_err());
    assert_eq!(db.reviews.count_links(&review.id).expect("links"), 0);
    assert_eq!(db.reviews.count_by_store(&store.id).expect("count"), 0);

    // Failpoints fire once; the retry succeeds.
    insert(&db, &review, &[menu.id], &[file.id]);
    assert_eq!(db.reviews.count_links(&review.id).expect("links"), 2);
}

#[test]
fn like_ledger_is_idempotent_per_user() {
    let (db, _temp) = setup_temp_db();
    let store = seed_store(&db, "cafe");
    let review = Review::new(store.id.clone(), "erin".to_string(), 5);
    insert(&db, &review, &[], &[]);

    assert!(db.reviews.add_like(&review.id, "frank").expect("like"));
    assert!(!db.reviews.add_like(&review.id, "frank").expect("like again"));
    assert!(db.reviews.add_like(&review.id, "grace").expect("second user"));
    assert_eq!(db.reviews.count_likes(&review.id).expect("count"), 2);

    let view = db.reviews.get_view(&review.id, Some("frank")).expect("view").expect("present");
    assert_eq!(view.likes_count, 2);
    assert!(view.liked_by_me);

    assert!(db.reviews.remove_like(&review.id, "frank").expect("unlike"));
    assert!(!db.reviews.remove_like(&review.id, "frank").expect("unlike again"));
    let view = db.reviews.get_view(&review.id, Some("frank")).expect("view").expect("present");
    assert_eq!(view.likes_count, 1);
    assert!(!view.liked_by_me);
}

#[test]
fn likes_on_missing_review_are_rejected() {
    let (db, _temp) = setup_temp_db();
    let err = db.reviews.add_like("missing", "frank").expect_err("missing");
    assert!(matches!(err, AppError::ReviewNotFound));
    let err = db.reviews.remove_like("missing", "frank").expect_err("missing");
    assert!(matches!(err, AppError::ReviewNotFound));
}

#[test]
fn store_listing_reports_viewer_like_state() {
    let (db, _temp) = setup_temp_db();
    let store = seed_store(&db, "izakaya");
    let other = seed_store(&db, "pizzeria");
    let first = Review::new(store.id.clone(), "hana".to_string(), 4);
    insert(&db, &first, &[], &[]);
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = Review::new(store.id.clone(), "ivan".to_string(), 2);
    insert(&db, &second, &[], &[]);
    insert(
        &db,
        &Review::new(other.id.clone(), "hana".to_string(), 1),
        &[],
        &[],
    );
    db.reviews.add_like(&first.id, "jun").expect("like");

    let listed = db
        .reviews
        .list_by_store(&store.id, ReviewSort::New, Some("jun"))
        .expect("list");
    let ids: Vec<&str> = listed.iter().map(|v| v.review.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    assert!(listed[1].liked_by_me);
    assert!(!listed[0].liked_by_me);

    let liked = db
        .reviews
        .list_by_store(&store.id, ReviewSort::Liked, None)
        .expect("list liked");
    assert_eq!(liked[0].review.id, first.id);
    assert_eq!(liked[0].likes_count, 1);
    assert!(!liked[0].liked_by_me);
}
