use serde_json::json;
use tone_rs::{decode, encode, DecodeOptions, EncodeOptions};

fn main() {
    println!("=== TONE Decode Examples ===\n");

    // Example 1: Decode simple object
    println!("1. Decode simple object:");
    let tone = "name: Alice\nage: 30\nactive: true";
    println!("TONE input:\n{}\n", tone);
    let result = decode(tone, &DecodeOptions::default()).unwrap();
    println!(
        "JSON output:\n{}\n",
        serde_json::to_string_pretty(&result).unwrap()
    );

    // Example 2: Decode nested object
    println!("2. Decode nested object:");
    let tone = "user:\n  id: 123\n  name: Bob\n  email: bob@example.com";
    println!("TONE input:\n{}\n", tone);
    let result = decode(tone, &DecodeOptions::default()).unwrap();
    println!(
        "JSON output:\n{}\n",
        serde_json::to_string_pretty(&result).unwrap()
    );

    // Example 3: Decode primitive array
    println!("3. Decode primitive array:");
    let tone = "tags[3]: admin,user,developer";
    println!("TONE input:\n{}\n", tone);
    let result = decode(tone, &DecodeOptions::default()).unwrap();
    println!(
        "JSON output:\n{}\n",
        serde_json::to_string_pretty(&result).unwrap()
    );

    // Example 4: Decode tabular array
    println!("4. Decode tabular array:");
    let tone = "users[2]{id,name,role}:\n  1,Alice,admin\n  2,Bob,user";
    println!("TONE input:\n{}\n", tone);
    let result = decode(tone, &DecodeOptions::default()).unwrap();
    println!(
        "JSON output:\n{}\n",
        serde_json::to_string_pretty(&result).unwrap()
    );

    // Example 5: Decode mixed array as a list
    println!("5. Decode mixed array:");
    let tone = "items[3]:\n  - 42\n  - text\n  - true";
    println!("TONE input:\n{}\n", tone);
    let result = decode(tone, &DecodeOptions::default()).unwrap();
    println!(
        "JSON output:\n{}\n",
        serde_json::to_string_pretty(&result).unwrap()
    );

    // Example 6: Round-trip encoding/decoding
    println!("6. Round-trip test:");
    let original = json!({
        "product": "Widget",
        "price": 9.99,
        "tags": ["new", "featured"],
        "specs": {
            "weight": 1.5,
            "color": "blue"
        }
    });
    println!(
        "Original JSON:\n{}\n",
        serde_json::to_string_pretty(&original).unwrap()
    );

    let tone = encode(&original, &EncodeOptions::default()).unwrap();
    println!("Encoded to TONE:\n{}\n", tone);

    let decoded = decode(&tone, &DecodeOptions::default()).unwrap();
    println!(
        "Decoded back to JSON:\n{}\n",
        serde_json::to_string_pretty(&decoded).unwrap()
    );

    if original == decoded {
        println!("Round-trip successful!\n");
    }

    // Example 7: Decode with quoted strings and escapes
    println!("7. Decode quoted strings with escapes:");
    let tone = r#"url: "http://example.com:8080"
text: "Line1\nLine2\tTab"
reserved: "true""#;
    println!("TONE input:\n{}\n", tone);
    let result = decode(tone, &DecodeOptions::default()).unwrap();
    println!(
        "JSON output:\n{}\n",
        serde_json::to_string_pretty(&result).unwrap()
    );

    // Example 8: Decode with tab delimiter
    println!("8. Decode tabular array with tab delimiter:");
    let tone_tab = "items[2\t]{id\tname\tprice}:\n  1\tWidget\t9.99\n  2\tGadget\t14.5";
    println!("TONE input (tabs):\n{}\n", tone_tab);
    let result = decode(tone_tab, &DecodeOptions::default()).unwrap();
    println!(
        "JSON output:\n{}\n",
        serde_json::to_string_pretty(&result).unwrap()
    );

    // Example 9: Decode Unicode characters
    println!("9. Decode Unicode characters:");
    let tone = "message: Hello World\ngreeting: こんにちは\nmultilingual[3]: Hola,Bonjour,Ciao";
    println!("TONE input:\n{}\n", tone);
    let result = decode(tone, &DecodeOptions::default()).unwrap();
    println!(
        "JSON output:\n{}\n",
        serde_json::to_string_pretty(&result).unwrap()
    );

    // Example 10: Complex round-trip
    println!("10. Complex data structure round-trip:");
    let complex = json!({
        "company": "TechCorp",
        "employees": [
            {"id": 1, "name": "Alice", "active": true},
            {"id": 2, "name": "Bob", "active": false},
            {"id": 3, "name": "Charlie", "active": true}
        ],
        "metadata": {
            "created": "2025-01-01",
            "version": "2.0"
        }
    });

    let tone = encode(&complex, &EncodeOptions::default()).unwrap();
    println!("TONE format:\n{}\n", tone);

    let decoded = decode(&tone, &DecodeOptions::default()).unwrap();
    println!(
        "Round-trip match: {}",
        if complex == decoded { "PASS" } else { "FAIL" }
    );
}
