// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Record and fixture commands.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use factory_config::asset::AssetStore;
use factory_config::cbor;
use factory_config::crypto::ring;
use factory_config::embed::CSources;
use factory_config::fixture;
use factory_config::fixture::CatalogConfig;
use factory_config::record::template::Template;

/// Commands for building and reading configuration records.
#[derive(structopt::StructOpt)]
#[structopt(author)]
pub enum Record {
    /// Generate every fixture in the catalog.
    Generate {
        /// Directory holding the keys, CSRs and certificates to embed.
        #[structopt(long, parse(from_os_str))]
        assets: PathBuf,

        /// Directory to write fixtures into; created if missing.
        #[structopt(long, parse(from_os_str))]
        out: PathBuf,

        /// Value for `mbed.CurrentTime`, in seconds since the Unix epoch;
        /// defaults to now.
        #[structopt(long)]
        current_time: Option<u64>,

        /// C source to render the assets and records into.
        #[structopt(long, parse(from_os_str), requires = "h-file")]
        c_file: Option<PathBuf>,

        /// C header to go with `--c-file`.
        #[structopt(long, parse(from_os_str), requires = "c-file")]
        h_file: Option<PathBuf>,

        /// Prefix for every C identifier.
        #[structopt(long, default_value = "")]
        prefix: String,
    },

    /// Encode a single record described by a JSON template.
    Encode {
        /// Directory holding the assets the template refers to.
        #[structopt(long, parse(from_os_str))]
        assets: PathBuf,

        /// Input file, defaults to stdin.
        #[structopt(short = "i", long, parse(from_os_str))]
        input: Option<PathBuf>,

        /// Output file, defaults to stdout.
        #[structopt(short = "o", long, parse(from_os_str))]
        output: Option<PathBuf>,
    },

    /// Decode a CBOR record into JSON.
    ShowRecord {
        /// Whether to pretty-print the resulting JSON.
        #[structopt(long)]
        pretty: bool,

        /// Input file, defaults to stdin.
        #[structopt(short = "i", long, parse(from_os_str))]
        input: Option<PathBuf>,

        /// Output file, defaults to stdout.
        #[structopt(short = "o", long, parse(from_os_str))]
        output: Option<PathBuf>,
    },
}

impl Record {
    pub fn run(self) {
        match self {
            Self::Generate {
                assets,
                out,
                current_time,
                c_file,
                h_file,
                prefix,
            } => {
                let store = check!(
                    AssetStore::load_dir(&assets),
                    "failed to load assets from {}",
                    assets.display()
                );
                let current_time = current_time.unwrap_or_else(|| {
                    check!(SystemTime::now().duration_since(UNIX_EPOCH), "bad clock")
                        .as_secs()
                });
                let config = CatalogConfig { current_time };

                let mut hasher = ring::hash::Engine::new();
                let fixtures = check!(
                    fixture::catalog::build(&store, &mut hasher, &config),
                    "failed to build fixtures"
                );
                check!(
                    fixture::write_all(&fixtures, &out),
                    "failed to write fixtures"
                );

                if let (Some(c_file), Some(h_file)) = (c_file, h_file) {
                    let sources = check!(
                        CSources::from_catalog(&store, &fixtures, &config, prefix),
                        "failed to embed fixtures"
                    );
                    check!(
                        fs::write(&h_file, sources.header()),
                        "failed to write {}",
                        h_file.display()
                    );
                    check!(
                        fs::write(&c_file, sources.source()),
                        "failed to write {}",
                        c_file.display()
                    );
                }
                eprintln!(
                    "generated {} fixtures in {}",
                    fixtures.len(),
                    out.display()
                );
            }

            Self::Encode {
                assets,
                input,
                output,
            } => {
                let input = crate::util::read_input(input.as_deref());
                let mut w = crate::util::open_output(output.as_deref());

                let store = check!(
                    AssetStore::load_dir(&assets),
                    "failed to load assets from {}",
                    assets.display()
                );
                let template: Template = check!(
                    serde_json::from_slice(&input),
                    "failed to parse template"
                );
                let record =
                    check!(template.build(&store), "failed to build record");
                check!(
                    w.write_all(&record.to_cbor()).and_then(|_| w.flush()),
                    "failed to write record"
                );
            }

            Self::ShowRecord {
                pretty,
                input,
                output,
            } => {
                let input = crate::util::read_input(input.as_deref());
                let w = crate::util::open_output(output.as_deref());

                let value = check!(
                    cbor::decode(&input),
                    "failed to decode record"
                );
                crate::util::write_json(w, &value, pretty);
            }
        }
    }
}
