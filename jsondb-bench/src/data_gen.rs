//! Data generators for benchmarks

use fake::faker::company::en::*;
use fake::faker::internet::en::*;
use fake::faker::lorem::en::*;
use fake::faker::name::en::*;
use fake::Fake;
use jsondb::collection::Document;
use jsondb::doc;
use rand::Rng;

/// Generate documents with explicit ids for CRUD and query benchmarks
pub fn generate_simple_docs(count: usize) -> Vec<Document> {
    (0..count).map(generate_single_doc).collect()
}

/// Generate a single document with the id `doc-<id>`
pub fn generate_single_doc(id: usize) -> Document {
    let mut rng = rand::thread_rng();
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let email: String = FreeEmail().fake();
    let company: String = CompanyName().fake();
    let age: i64 = rng.gen_range(18..80);
    let salary: f64 = rng.gen_range(30000.0..200000.0);

    doc! {
        _id: (format!("doc-{}", id)),
        firstName: (first_name),
        lastName: (last_name),
        email: (email),
        company: (company),
        age: (age),
        salary: (salary),
        active: (rng.gen_bool(0.8)),
        tags: (generate_tags(&mut rng))
    }
}

/// Generate a document without `_id`, so the collection draws one
pub fn generate_anonymous_doc() -> Document {
    let title: String = Sentence(3..8).fake();
    let author: String = Name().fake();

    doc! {
        title: (title),
        author: (author)
    }
}

fn generate_tags(rng: &mut impl Rng) -> Vec<String> {
    let count = rng.gen_range(0..4);
    (0..count).map(|_| Word().fake()).collect()
}
