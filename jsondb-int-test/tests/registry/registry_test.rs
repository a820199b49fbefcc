use jsondb::collection::{skip_save, InsertOptions, JsonCollection};
use jsondb::doc;
use jsondb::filter::{field, Query};
use jsondb_int_test::test_util::{cleanup, create_test_context, random_path, run_test};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_multi_threaded_insert() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.collection();
            let num_threads = 5;
            let inserts_per_thread = 10;
            let barrier = Arc::new(Barrier::new(num_threads));

            let mut handles = vec![];
            for thread_id in 0..num_threads {
                let collection = Arc::clone(&collection);
                let barrier = Arc::clone(&barrier);

                handles.push(thread::spawn(move || {
                    barrier.wait();
                    for i in 0..inserts_per_thread {
                        let value = format!("thread_{}_seq_{}", thread_id, i);
                        collection.lock().insert(
                            doc! { thread_id: thread_id, sequence: i, value: value },
                            InsertOptions::default(),
                        );
                    }
                }));
            }
            for handle in handles {
                let _ = handle.join();
            }

            assert_eq!(*collection.lock().count(Query::all()).data(), num_threads * inserts_per_thread);
            assert_eq!(*collection.lock().count(field("thread_id").eq(2)).data(), inserts_per_thread);

            let path = ctx.path().map(|p| p.to_path_buf()).unwrap_or_default();
            ctx.registry().close_all();
            let reopened = JsonCollection::open(&path)?;
            assert_eq!(reopened.size(), num_threads * inserts_per_thread);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_registry_hands_out_the_same_collection() {
    run_test(
        create_test_context,
        |ctx| {
            let path = ctx.path().map(|p| p.to_path_buf()).unwrap_or_default();
            let registry = ctx.registry();

            let again = registry.collection(&path, Some("test"))?;
            assert!(Arc::ptr_eq(&again, &ctx.collection()));

            again.lock().insert(doc! { _id: "shared" }, skip_save());
            assert_eq!(ctx.collection().lock().size(), 1);

            assert_eq!(registry.names(), vec!["test".to_string()]);
            assert!(registry.get("test").is_some());
            assert!(registry.get("missing").is_none());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_registry_memory_collections_are_private() {
    run_test(
        create_test_context,
        |ctx| {
            let registry = ctx.registry();
            let first = registry.memory();
            let second = registry.memory();
            first.lock().insert(doc! { a: 1 }, InsertOptions::default());

            assert!(first.lock().is_in_memory());
            assert_eq!(first.lock().size(), 1);
            assert_eq!(second.lock().size(), 0);
            assert_eq!(registry.names(), vec!["test".to_string()]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_two_paths_in_one_registry() {
    let registry = jsondb::registry::Registry::new();
    let first_path = random_path();
    let second_path = random_path();

    let first = registry.collection(&first_path, None).unwrap();
    let second = registry.collection(&second_path, None).unwrap();
    first.lock().insert(doc! { _id: "one" }, InsertOptions::default());
    second.lock().insert(doc! { _id: "two" }, InsertOptions::default());
    second.lock().insert(doc! { _id: "three" }, InsertOptions::default());
    registry.close_all();

    assert_eq!(JsonCollection::open(&first_path).unwrap().size(), 1);
    assert_eq!(JsonCollection::open(&second_path).unwrap().size(), 2);

    std::fs::remove_file(&first_path).unwrap();
    std::fs::remove_file(&second_path).unwrap();
}
