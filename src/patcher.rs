use std::fs;

use log::{debug, info};
use serde_json::{Map, Value};

use crate::aws::AwsCli;
use crate::config::Config;
use crate::error::{PatchError, Result};
use crate::patch;

/// Runs the whole fix as a strict linear pipeline: fetch the current
/// distribution config, overwrite its error-response rules, persist the
/// result locally, and push it back under the fetch-time ETag. Any failure
/// aborts the run; nothing is retried and the local file is never cleaned up.
pub struct DistributionPatcher {
    config: Config,
    aws: AwsCli,
}

impl DistributionPatcher {
    pub fn new(config: Config) -> Self {
        let aws = AwsCli::new(config.aws_bin.clone());
        Self { config, aws }
    }

    pub async fn run(&self) -> Result<()> {
        let id = &self.config.distribution_id;

        println!("🔧 Fixing CloudFront SPA routing...");
        println!("📡 Distribution ID: {id}");

        println!("📋 Fetching current distribution config...");
        let envelope = self.aws.get_distribution_config(id).await?;
        println!("📌 ETag: {}", envelope.etag);

        println!("🔧 Adding SPA error page rules...");
        let mut distribution_config = envelope.distribution_config;
        patch::apply_spa_fallback(&mut distribution_config);

        self.persist(&distribution_config)?;
        info!("Wrote patched config to {}", self.config.output_file);
        println!("✅ New config written to {}", self.config.output_file);

        println!("🚀 Updating CloudFront distribution...");
        let output = self
            .aws
            .update_distribution(id, &self.config.output_file, &envelope.etag)
            .await?;
        debug!("update-distribution output: {}", output.trim());

        self.report(id);
        Ok(())
    }

    fn persist(&self, config: &Map<String, Value>) -> Result<()> {
        let pretty = serde_json::to_string_pretty(config)?;
        fs::write(&self.config.output_file, pretty).map_err(|source| PatchError::WriteFailed {
            path: self.config.output_file.clone(),
            source,
        })
    }

    fn report(&self, id: &str) {
        println!("✅ CloudFront distribution updated!");
        println!("⏳ Deployment takes around 5-15 minutes to complete.");
        println!();
        println!("📋 Error pages now configured:");
        println!("  - 403 Forbidden → /index.html (200)");
        println!("  - 404 Not Found → /index.html (200)");
        println!();
        println!("🔍 Check deployment status with:");
        println!("aws cloudfront get-distribution --id {id} --query 'Distribution.Status'");
        println!();
        println!("🎉 SPA routing fix complete!");
        println!("💡 Refreshing a deep link will no longer return Access Denied.");
    }
}
