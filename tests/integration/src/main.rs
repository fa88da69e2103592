//! Integration Test Harness
//!
//! Runs every integration test category and prints a summary.
//!
//! # Usage
//!
//! Run all tests:
//! ```text
//! cargo run -p integration-tests
//! ```
//!
//! Run specific test categories:
//! ```text
//! cargo test -p integration-tests --test security_init_tests
//! cargo test -p integration-tests --test global_instance_tests
//! cargo test -p integration-tests --test attribute_value_tests
//! ```
//!
//! Run with increased logging:
//! ```text
//! RUST_LOG=debug cargo run -p integration-tests
//! ```

use std::process::Command;
use std::time::{Duration, Instant};

/// Test category
#[derive(Debug, Clone)]
struct TestCategory {
    name: &'static str,
    description: &'static str,
    test_name: &'static str,
}

const TEST_CATEGORIES: &[TestCategory] = &[
    TestCategory {
        name: "Security Initialization",
        description: "One-time guard, concurrent first calls, failure policy",
        test_name: "security_init_tests",
    },
    TestCategory {
        name: "Global Instance",
        description: "Process-wide entry points and time_as_utc",
        test_name: "global_instance_tests",
    },
    TestCategory {
        name: "Attribute Values",
        description: "Deep copy semantics and timestamp marshalling",
        test_name: "attribute_value_tests",
    },
];

struct CategoryResult {
    name: &'static str,
    passed: bool,
    duration: Duration,
}

fn run_category(category: &TestCategory) -> CategoryResult {
    println!("\n=== {} ===", category.name);
    println!("{}", category.description);

    let start = Instant::now();
    let status = Command::new(env!("CARGO"))
        .args(["test", "-p", "integration-tests", "--test", category.test_name])
        .status();
    let passed = matches!(status, Ok(s) if s.success());

    CategoryResult {
        name: category.name,
        passed,
        duration: start.elapsed(),
    }
}

fn main() {
    println!("OPC Classic foundation integration tests");

    let results: Vec<CategoryResult> = TEST_CATEGORIES.iter().map(run_category).collect();

    println!("\n=== Summary ===");
    for result in &results {
        let mark = if result.passed { "PASS" } else { "FAIL" };
        println!("[{}] {} ({:.2?})", mark, result.name, result.duration);
    }

    let failed = results.iter().filter(|r| !r.passed).count();
    if failed > 0 {
        println!("\n{} of {} categories failed", failed, results.len());
        std::process::exit(1);
    }
    println!("\nAll {} categories passed", results.len());
}
