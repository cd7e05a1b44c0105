//! The `roster init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create roster.toml
    if std::path::Path::new("roster.toml").exists() {
        println!("roster.toml already exists, skipping.");
    } else {
        std::fs::write("roster.toml", SAMPLE_CONFIG)?;
        println!("Created roster.toml");
    }

    // Create example seed file
    std::fs::create_dir_all("seed")?;
    let seed_path = std::path::Path::new("seed/students.toml");
    if seed_path.exists() {
        println!("seed/students.toml already exists, skipping.");
    } else {
        std::fs::write(seed_path, EXAMPLE_SEED)?;
        println!("Created seed/students.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit seed/students.toml with your students");
    println!("  2. Run: roster validate --seed seed/students.toml");
    println!("  3. Run: roster session");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# roster configuration

seed_file = "seed/students.toml"
sample_data = false
output_dir = "./roster-output"
notice_duration_ms = 3000
"#;

const EXAMPLE_SEED: &str = r#"# Students loaded at the start of every session.

[[students]]
id = "S001"
name = "John Doe"
gender = "Male"
age = 15
form = 1

[[students.performance]]
form = 1
math = 75
english = 80
science = 70
social = 85

[[students]]
id = "S002"
name = "Jane Smith"
gender = "Female"
age = 16
form = 2

[[students.performance]]
form = 1
math = 85
english = 90
science = 88
social = 92

[[students.performance]]
form = 2
math = 78
english = 85
science = 82
social = 88
"#;
