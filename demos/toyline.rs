//! Decodes a toy-store search querystring, edits it and writes it back.
//!
//! ```text
//! cargo run --example toyline -- '?filters_toyline=3&filters_tags=Walmart|Target'
//! ```

use serde::{Deserialize, Serialize};
use structured_qs::{Schema, SearchParams};

#[derive(Debug, Deserialize, Serialize)]
struct Price {
    min: Option<u32>,
    max: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize)]
struct Filters {
    toyline: u32,
    #[serde(default)]
    tags: Vec<String>,
    price: Option<Price>,
}

#[derive(Debug, Deserialize, Serialize)]
struct Query {
    filters: Filters,
    page: Option<u16>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "?filters_toyline=3&filters_tags=foo|bar&utm_source=ad".to_string());

    let mut params = match SearchParams::parse_with(&input, &Schema::<Query>::new()) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    println!("decoded:  {:?}", params.all());

    params.set("filters.toyline", 5);
    params.set("filters.price.max", 20);
    params.clear("filters.tags");
    println!("encoded:  ?{}", params);

    match params.to_typed::<Query>() {
        Ok(query) => println!("typed:    {:?}", query),
        Err(e) => eprintln!("{}", e),
    }
}
