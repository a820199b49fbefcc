use jsondb::collection::{multi, skip_save, JsonCollection};
use jsondb::doc;
use jsondb::errors::JsonDbResult;
use jsondb::filter::{field, Query};
use jsondb_int_test::test_util::random_path;

fn main() -> JsonDbResult<()> {
    println!("Starting stress test...");
    let path = random_path();
    let mut collection = JsonCollection::open(&path)?;

    let count = 100_000;
    let start = std::time::Instant::now();
    for i in 0..count {
        let record = doc! {
            first_name: (uuid::Uuid::new_v4().to_string()),
            last_name: (uuid::Uuid::new_v4().to_string()),
            sequence: i,
            processed: false,
            failed: false,
        };
        collection.insert(record, skip_save()).into_result()?;
    }
    println!("Inserted {} records in {:?}", count, start.elapsed());

    let start = std::time::Instant::now();
    let found = collection.count(field("failed").eq(false)).into_result()?;
    println!("Matched {} records in {:?}", found, start.elapsed());

    let start = std::time::Instant::now();
    let updated = collection
        .update(Query::all(), doc! { "$set": { processed: true } }, multi())
        .into_result()?;
    println!("Updated {} records in {:?}", updated, start.elapsed());

    let start = std::time::Instant::now();
    collection.close();
    println!("Saved to {} in {:?}", path.display(), start.elapsed());

    let start = std::time::Instant::now();
    let reopened = JsonCollection::open(&path)?;
    let processed = reopened.count(field("processed").eq(true)).into_result()?;
    println!("Reloaded {} processed records in {:?}", processed, start.elapsed());

    std::fs::remove_file(&path)?;
    Ok(())
}
