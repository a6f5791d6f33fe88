use anyhow::Result;

use crate::analysis::samples;

pub struct SamplesCommand;

impl SamplesCommand {
    pub fn execute(&self) -> Result<()> {
        println!("📦 SAMPLE FEATURES");
        println!("──────────────────");
        for (i, sample) in samples().iter().enumerate() {
            println!();
            println!("#{} {}", i + 1, sample.title);
            println!("   🏷️  Category: {}", sample.category);
            println!("   🌍 Regions: {}", sample.regions.join(", "));
            println!("   📝 {}", sample.description);
            println!("   💻 {}", sample.code_snippet);
        }
        println!();
        println!("💡 Run one with: compliance-lens analyze --sample 1");
        Ok(())
    }
}
