use crate::output::{print_json, print_table};
use anyhow::{bail, Result};
use clap::Subcommand;
use lev_core::config::{SiteConfig, CONFIG_FILE};
use std::path::Path;

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show the resolved site configuration (file + environment)
    Show,
    /// Write a default lev.yaml to the site root
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(root: &Path, subcommand: ConfigSubcommand, json: bool) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Init { force } => init(root, force),
    }
}

fn show(root: &Path, json: bool) -> Result<()> {
    let public = SiteConfig::resolve(root)?.public();
    if json {
        return print_json(&public);
    }

    println!("Product:  {}", public.product_name);
    println!("Founder:  {} ({})", public.founder_name, public.founder_role);
    println!("LinkedIn: {}", public.founder_linkedin_url);
    println!();
    let rows = public
        .booking
        .iter()
        .map(|b| {
            vec![
                format!("{} min", b.duration),
                if b.url.is_empty() { "-".to_string() } else { b.url.clone() },
                if b.cal_com { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    print_table(&["DURATION", "URL", "CAL.COM"], rows);
    Ok(())
}

fn init(root: &Path, force: bool) -> Result<()> {
    let path = root.join(CONFIG_FILE);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    SiteConfig::default().save(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
