// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Walk through a hosted database and run a query against it.
//!
//! ```bash
//! DBHUB_API_KEY=... cargo run --example query -- justinclift "Join Testing.sqlite"
//! ```
//!
//! Set `DBHUB_SERVER` to point at a development server, and
//! `RUST_LOG=dbhub=debug` to see each request.

use dbhub::Database;

fn main() {
    let mut args = std::env::args().skip(1);
    let owner = args.next().unwrap_or_else(|| "justinclift".to_string());
    let name = args
        .next()
        .unwrap_or_else(|| "Join Testing.sqlite".to_string());

    let database = Database::from_env();
    if !database.has_api_key() {
        eprintln!("DBHUB_API_KEY environment variable required");
        std::process::exit(2);
    }

    let conn = database.connect().expect("Failed to connect");
    println!("=== {}/{} on {} ===\n", owner, name, conn.server());

    let tables = conn.tables(&owner, &name).expect("Failed to list tables");
    println!("Tables: {:?}", tables);

    let views = conn.views(&owner, &name).expect("Failed to list views");
    println!("Views: {:?}", views);

    let indexes = conn.indexes(&owner, &name).expect("Failed to list indexes");
    for (index, table) in &indexes {
        println!("Index: {} on {}", index, table);
    }

    if let Some(table) = tables.first() {
        let columns = conn
            .columns(&owner, &name, table)
            .expect("Failed to list columns");
        println!("\nColumns of {}:", table);
        for column in &columns {
            println!(
                "  {} {}{}",
                column.name,
                column.data_type,
                if column.is_primary_key() { " (pk)" } else { "" }
            );
        }

        let sql = format!("SELECT * FROM \"{}\" LIMIT 10", table.replace('"', "\"\""));
        let results = conn
            .query(&owner, &name, true, &sql)
            .expect("Failed to run query");
        println!("\n{} -> {} rows", sql, results.len());
        for row in &results {
            println!("  {}", row.fields.join(" | "));
        }
    }
}
