use serde_json::json;
use tone_rs::{encode, Delimiter, EncodeOptions};

fn main() {
    println!("=== JSON to TONE Examples ===\n");

    println!("1. Simple object:");
    let data = json!({
        "name": "Alice",
        "age": 30,
        "active": true
    });
    println!("{}\n", encode(&data, &EncodeOptions::default()).unwrap());

    println!("2. Nested object:");
    let data = json!({
        "user": {
            "id": 123,
            "name": "Bob",
            "email": "bob@example.com"
        },
        "status": "active"
    });
    println!("{}\n", encode(&data, &EncodeOptions::default()).unwrap());

    println!("3. Primitive array:");
    let data = json!({
        "tags": ["admin", "user", "developer"]
    });
    println!("{}\n", encode(&data, &EncodeOptions::default()).unwrap());

    println!("4. Tabular array:");
    let data = json!({
        "users": [
            {"id": 1, "name": "Alice", "role": "admin"},
            {"id": 2, "name": "Bob", "role": "user"}
        ]
    });
    println!("{}\n", encode(&data, &EncodeOptions::default()).unwrap());

    println!("5. Mixed-type array (no longer falls back to a list):");
    let data = json!({
        "items": [42, "text", true]
    });
    println!("{}\n", encode(&data, &EncodeOptions::default()).unwrap());

    println!("6. Heterogeneous array of objects (list fallback):");
    let data = json!({
        "items": [
            {"id": 1},
            {"id": 2, "flagged": true}
        ]
    });
    println!("{}\n", encode(&data, &EncodeOptions::default()).unwrap());

    println!("7. Tab delimiter:");
    let data = json!({
        "items": [
            {"id": 1, "name": "Widget", "price": 9.99},
            {"id": 2, "name": "Gadget", "price": 14.50}
        ]
    });
    let options = EncodeOptions::new().with_delimiter(Delimiter::Tab);
    println!("{}\n", encode(&data, &options).unwrap());

    println!("8. Pipe delimiter:");
    let data = json!({
        "categories": ["reading", "gaming", "coding"]
    });
    let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
    println!("{}\n", encode(&data, &options).unwrap());

    println!("9. Length marker:");
    let data = json!({
        "categories": ["reading", "gaming", "coding"]
    });
    let options = EncodeOptions::new().with_length_marker(true);
    println!("{}\n", encode(&data, &options).unwrap());

    println!("10. Quoting special characters:");
    let data = json!({
        "url": "http://example.com:8080",
        "text": "Hello\nWorld",
        "reserved": "true",
        "numeric_string": "007"
    });
    println!("{}\n", encode(&data, &EncodeOptions::default()).unwrap());

    println!("11. Unicode support:");
    let data = json!({
        "message": "Hello World",
        "greeting": "こんにちは",
        "multilingual": ["Hola", "Bonjour", "Ciao"]
    });
    println!("{}", encode(&data, &EncodeOptions::default()).unwrap());
}
