use anyhow::Result;
use cinescout_client::{DescriptionRequest, MovieService};
use cinescout_core::model::movie::synthesize_id;
use cinescout_core::MovieDescription;

/// Fetch and print the AI introduction for one movie.
pub async fn run_describe(
    service: &dyn MovieService,
    title: String,
    year: i32,
    id: Option<String>,
) -> Result<()> {
    let id = id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| synthesize_id(0, &title, year));
    let request = DescriptionRequest { id, title, year };

    let description = service
        .movie_description(&request)
        .await
        .map_err(super::service_failure)?;
    print!("{}", format_description(&request, &description));
    Ok(())
}

fn format_description(request: &DescriptionRequest, description: &MovieDescription) -> String {
    let mut out = format!("{} ({})\n\nAI Introduction\n", request.title, request.year);
    if description.summary.is_empty() {
        out.push_str("No introduction available.\n");
    } else {
        out.push_str(&description.summary);
        out.push('\n');
    }
    if !description.themes().is_empty() {
        out.push_str("\nKey Themes\n");
        out.push_str(&description.themes().join(", "));
        out.push('\n');
    }
    out
}
