use major_match::dataset::read_reference;
use major_match::{Recommender, RecommenderConfig, StudentProfile};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Minimal end-to-end: reference CSV + one new student -> ranked majors.
    //
    // Pass a JSON config path as the first argument to try another weight
    // table or k; the built-in configuration is used otherwise.
    let config = match std::env::args().nth(1) {
        Some(path) => RecommenderConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => RecommenderConfig::default(),
    };
    let recommender = Recommender::new(config)?;

    let reference = read_reference(include_str!("reference.csv").as_bytes())?;

    let student = StudentProfile::new("Iis Sukmawati", "Ilmu Komputer", "Robotik")
        .with_skills(["Analisis Data", "Problem Solving"])
        .with_club_count(3)
        .with_contribution(4.0)
        .with_achievement(4.0);

    let rec = recommender.recommend(&student, &reference)?;

    println!(
        "{} -> cluster {} ({}), sse={:.3}",
        rec.name,
        rec.cluster_id,
        rec.cluster_label.as_deref().unwrap_or("-"),
        rec.sse
    );
    for (i, m) in rec.majors.iter().enumerate() {
        println!("  {}. {:<28} {:.2}", i + 1, m.major, m.score);
    }

    // Student vs typical member, both in raw units.
    println!("\n  {:<24} {:>8} {:>8}", "feature", "student", "cluster");
    for ((name, v), m) in rec
        .feature_names
        .iter()
        .zip(&rec.vector)
        .zip(&rec.member_mean)
    {
        println!("  {:<24} {:>8.2} {:>8.2}", name, v, m);
    }

    Ok(())
}
