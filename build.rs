// Compiles the RON tables under data/ into postcard blobs and a phf map in OUT_DIR.
// A table that fails validation fails the build.

use schema::{CategorySplit, EggGroupName, MachineEntry, TutorEntry, TypeChartData};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::env;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let data_dir = Path::new("data");

    let chart: TypeChartData = load_ron(&data_dir.join("type_chart.ron"))?;
    chart.validate()?;
    write_blob(&out_dir.join("type_chart.bin"), &chart)?;

    let split: CategorySplit = load_ron(&data_dir.join("gen3_categories.ron"))?;
    split.validate()?;
    write_blob(&out_dir.join("gen3_categories.bin"), &split)?;

    let machines: Vec<MachineEntry> = load_ron(&data_dir.join("tms_hms.ron"))?;
    write_blob(&out_dir.join("tms_hms.bin"), &machines)?;

    let tutors: Vec<TutorEntry> = load_ron(&data_dir.join("move_tutors.ron"))?;
    write_blob(&out_dir.join("move_tutors.bin"), &tutors)?;

    let egg_groups: Vec<EggGroupName> = load_ron(&data_dir.join("egg_groups.ron"))?;
    write_egg_groups(&out_dir.join("egg_groups.rs"), &egg_groups)?;

    Ok(())
}

fn load_ron<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={}", path.display());
    let text = fs::read_to_string(path)?;
    ron::from_str(&text).map_err(|e| format!("{}: {}", path.display(), e).into())
}

fn write_blob<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = postcard::to_allocvec(value)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn write_egg_groups(path: &Path, groups: &[EggGroupName]) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = BufWriter::new(fs::File::create(path)?);

    let mut map = phf_codegen::Map::new();
    for group in groups {
        map.entry(group.name.as_str(), &format!("{:?}", group.display_name));
    }
    writeln!(
        file,
        "static EGG_GROUP_DISPLAY_NAMES: phf::Map<&'static str, &'static str> = {};",
        map.build()
    )?;

    let names: Vec<String> = groups.iter().map(|g| format!("{:?}", g.name)).collect();
    writeln!(
        file,
        "static EGG_GROUP_ORDER: &[&str] = &[{}];",
        names.join(", ")
    )?;
    Ok(())
}
