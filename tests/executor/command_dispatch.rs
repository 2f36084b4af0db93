//! JSON command round trips through the executor.

use serde_json::json;

use crate::common::*;

fn run(executor: &Executor, command: serde_json::Value) -> serde_json::Value {
    let cmd: Command = serde_json::from_value(command).unwrap();
    let output = executor.execute(cmd).unwrap();
    serde_json::to_value(output).unwrap()
}

fn executor() -> Executor {
    init_tracing();
    Executor::new(DocumentStore::new())
}

#[test]
fn product_scenario_over_json() {
    let executor = executor();

    assert_eq!(
        run(
            &executor,
            json!({"CreateCollection": {
                "collection": "products",
                "settings": {"number_of_shards": 1, "number_of_replicas": 1}
            }})
        ),
        json!("Acknowledged")
    );

    assert_eq!(
        run(
            &executor,
            json!({"Index": {
                "collection": "products",
                "id": "coffee_maker_001",
                "document": {"name": "Coffee maker", "price": 64, "in_stock": 10}
            }})
        ),
        json!({"Write": {
            "_index": "products",
            "_id": "coffee_maker_001",
            "_version": 1,
            "result": "created"
        }})
    );

    assert_eq!(
        run(
            &executor,
            json!({"Update": {
                "collection": "products",
                "id": "coffee_maker_001",
                "body": {"doc": {"price": 59, "in_stock": 5, "on_sale": true}}
            }})
        )["Write"]["_version"],
        json!(2)
    );

    assert_eq!(
        run(
            &executor,
            json!({"Update": {
                "collection": "products",
                "id": "coffee_maker_001",
                "body": {"script": {
                    "source": "if (ctx._source.in_stock > 0) { ctx._source.in_stock--; }",
                    "lang": "painless"
                }}
            }})
        )["Write"]["result"],
        json!("updated")
    );

    assert_eq!(
        run(
            &executor,
            json!({"Get": {"collection": "products", "id": "coffee_maker_001"}})
        ),
        json!({"Get": {
            "_index": "products",
            "_id": "coffee_maker_001",
            "_version": 3,
            "found": true,
            "_source": {"name": "Coffee maker", "price": 59, "in_stock": 4, "on_sale": true}
        }})
    );
}

#[test]
fn scripted_upsert_over_json() {
    let executor = executor();
    let command = json!({"Update": {
        "collection": "products",
        "id": "blender_001",
        "body": {
            "script": "if (ctx._source.in_stock > 0) { ctx._source.in_stock--; }",
            "upsert": {"name": "Blender", "price": 399, "in_stock": 5}
        }
    }});

    let first = run(&executor, command.clone());
    assert_eq!(first["Write"]["result"], json!("created"));
    assert_eq!(first["Write"]["_version"], json!(1));

    let second = run(&executor, command);
    assert_eq!(second["Write"]["result"], json!("updated"));
    assert_eq!(second["Write"]["_version"], json!(2));

    let read = run(
        &executor,
        json!({"Get": {"collection": "products", "id": "blender_001"}}),
    );
    assert_eq!(read["Get"]["_source"]["in_stock"], json!(4));
}

#[test]
fn script_params_over_json() {
    let executor = executor();
    run(
        &executor,
        json!({"Index": {"collection": "products", "id": "p1", "document": {"price": 1.5}}}),
    );
    run(
        &executor,
        json!({"Update": {
            "collection": "products",
            "id": "p1",
            "body": {"script": {"source": "ctx._source.price *= params.factor", "params": {"factor": 2}}}
        }}),
    );
    let read = run(&executor, json!({"Get": {"collection": "products", "id": "p1"}}));
    assert_eq!(read["Get"]["_source"]["price"], json!(3.0));
}

#[test]
fn exists_and_count() {
    let executor = executor();
    run(
        &executor,
        json!({"Index": {"collection": "products", "document": {"name": "Anonymous"}}}),
    );
    assert_eq!(
        run(&executor, json!({"Count": {"collection": "products"}})),
        json!({"Count": 1})
    );
    assert_eq!(
        run(&executor, json!({"CollectionExists": {"collection": "products"}})),
        json!({"Bool": true})
    );
    assert_eq!(
        run(&executor, json!({"Exists": {"collection": "products", "id": "missing"}})),
        json!({"Bool": false})
    );
    assert_eq!(
        run(&executor, json!({"DropCollection": {"collection": "products"}})),
        json!("Acknowledged")
    );
    assert_eq!(
        run(&executor, json!({"CollectionExists": {"collection": "products"}})),
        json!({"Bool": false})
    );
}

#[test]
fn collection_info_and_listing() {
    let executor = executor();
    run(
        &executor,
        json!({"CreateCollection": {
            "collection": "products",
            "settings": {"number_of_shards": 3, "number_of_replicas": 1}
        }}),
    );
    run(
        &executor,
        json!({"Index": {"collection": "orders", "document": {"total": 12}}}),
    );
    run(
        &executor,
        json!({"Index": {"collection": "orders", "document": {"total": 7}}}),
    );

    let info = run(&executor, json!({"CollectionInfo": {"collection": "orders"}}));
    assert_eq!(info["CollectionInfo"]["_index"], json!("orders"));
    assert_eq!(info["CollectionInfo"]["docs_count"], json!(2));
    assert_eq!(
        info["CollectionInfo"]["settings"],
        json!({"number_of_shards": 1, "number_of_replicas": 1})
    );
    assert!(info["CollectionInfo"]["created_at"].as_u64().unwrap() > 0);

    let info = run(&executor, json!({"CollectionInfo": {"collection": "products"}}));
    assert_eq!(info["CollectionInfo"]["settings"]["number_of_shards"], json!(3));
    assert_eq!(info["CollectionInfo"]["docs_count"], json!(0));

    assert_eq!(
        run(&executor, json!("ListCollections")),
        json!({"Collections": ["orders", "products"]})
    );
}
