//! Print the OpenAPI document as pretty JSON for external tooling.

use folio_server::doc::ApiDoc;
use utoipa::OpenApi;

fn main() {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(document) => println!("{document}"),
        Err(err) => {
            eprintln!("failed to serialise OpenAPI document: {err}");
            std::process::exit(1);
        }
    }
}
