use snagger_core::{Phase, PipelineViewModel};

pub fn print_banner() {
    println!("snagger: paste a link and press Enter.");
    println!("commands: <number> choose variant, restart, quit");
}

pub fn render(view: &PipelineViewModel) {
    match view.phase {
        Phase::Idle => {
            println!("> ready for a new target");
        }
        Phase::Scanning => {
            println!("scanning target... step {}/{}", view.scan_step, view.scan_total);
        }
        Phase::Extracting => {
            println!("resolving deliverable...");
        }
        Phase::Ready => {
            render_ready(view);
        }
        Phase::Transferring => {
            let percent = view.progress_percent.unwrap_or(0);
            println!("transferring... {percent}%");
        }
        Phase::Failed => {
            let message = view.failure_message.as_deref().unwrap_or("unknown failure");
            println!("acquisition failed: {message}");
            println!("paste a link to try again");
        }
    }
}

fn render_ready(view: &PipelineViewModel) {
    if let Some(success) = view.outcome_reads_as_success() {
        if success {
            println!("transfer finished. pick another variant, or `restart`.");
        } else {
            println!("that variant has no usable link; pick another.");
        }
    }
    if let Some(title) = view.title.as_deref() {
        println!("{title}");
    }
    for row in &view.variants {
        let marker = if row.usable { " " } else { "!" };
        println!(
            "  {}{} [{}] {}",
            marker,
            row.index + 1,
            row.size_hint,
            row.label
        );
    }
    println!("choose a variant by number:");
}
