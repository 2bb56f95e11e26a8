use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shared::{ContentLibrary, PageId};
use site_core::{
    load_settings, HeadlessHost, ManualClock, NavRequest, PageContext, PageRegistry, SiteApp,
    SiteSettings, Viewport,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// JSON content file to use instead of the bundled posts.
    #[arg(long, global = true)]
    content: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the posts in the content library.
    Posts,
    /// Print the outline of one page.
    Render {
        #[arg(long, default_value = "home")]
        route: String,
    },
    /// Replay a navigation script with a manual clock. Steps are page names
    /// or `#N` to open the N-th post (1-based).
    Walk {
        #[arg(required = true)]
        steps: Vec<String>,
    },
    /// Run the background animation headless and report frame statistics.
    Frames {
        #[arg(long, default_value_t = 60)]
        count: u32,
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        #[arg(long, default_value_t = 720.0)]
        height: f32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the effective settings as JSON.
    Settings,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(path) = cli.content {
        settings.content_path = Some(path);
    }

    match cli.command {
        Command::Posts => {
            let library = settings.load_content().context("failed to load content")?;
            for post in library.posts() {
                let date = post
                    .published_on()
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| post.date.clone());
                println!("{}\t{}\t{}", post.id, date, post.title);
            }
        }
        Command::Render { route } => {
            let library = settings.load_content().context("failed to load content")?;
            let ctx = PageContext {
                library: &library,
                post: None,
            };
            print!("{}", PageRegistry::standard().render_route(&route, &ctx).outline());
        }
        Command::Walk { steps } => walk(&settings, &steps)?,
        Command::Frames {
            count,
            width,
            height,
            seed,
        } => {
            if seed.is_some() {
                settings.background.seed = seed;
            }
            frames(&settings, count, Viewport::new(width, height))?;
        }
        Command::Settings => {
            println!(
                "{}",
                serde_json::to_string_pretty(&settings).context("failed to encode settings")?
            );
        }
    }

    Ok(())
}

fn walk(settings: &SiteSettings, steps: &[String]) -> Result<()> {
    let library = settings.load_content().context("failed to load content")?;
    let mut settings = settings.clone();
    settings.background.enabled = false;

    tracing::debug!(steps = steps.len(), "replaying navigation script");
    let clock = ManualClock::new();
    let mut app = SiteApp::mount(
        HeadlessHost::new(Viewport::new(settings.window_width, settings.window_height)),
        &settings,
        library,
        Box::new(clock.clone()),
    )?;

    for step in steps {
        let request = parse_step(step, app.library())?;
        app.activate(request);
        clock.advance(app.navigation().delay());
        app.pump();

        let page = app.compose().page;
        let title = page.headings().next().unwrap_or_default().to_string();
        println!("{step} -> {}: {title}", app.state().current_page());
    }

    app.unmount();
    Ok(())
}

/// A page name (strict) or `#N` for the N-th post, counting from 1.
fn parse_step(step: &str, library: &ContentLibrary) -> Result<NavRequest> {
    let Some(index) = step.strip_prefix('#') else {
        return Ok(NavRequest::to(step.parse::<PageId>()?));
    };
    let index: usize = index
        .parse()
        .with_context(|| format!("invalid post index '{step}'"))?;
    let Some(post) = index
        .checked_sub(1)
        .and_then(|i| library.posts().get(i))
    else {
        bail!("no post at index {index}");
    };
    Ok(NavRequest::open_post(post.clone()))
}

fn frames(settings: &SiteSettings, count: u32, viewport: Viewport) -> Result<()> {
    let library = settings.load_content().context("failed to load content")?;
    let mut settings = settings.clone();
    settings.background.enabled = true;
    settings.background.required = true;

    let mut app = SiteApp::mount(
        HeadlessHost::new(viewport),
        &settings,
        library,
        Box::new(ManualClock::new()),
    )
    .context("failed to mount background")?;

    tracing::debug!(count, width = viewport.width, height = viewport.height, "running headless frames");
    let mut visible = 0usize;
    for _ in 0..count {
        app.host_mut().refresh();
        app.pump();
        visible += app.host().last_frame().map_or(0, |frame| frame.points.len());
    }

    let Some(animator) = app.background() else {
        bail!("background did not mount");
    };
    let (rotation_x, rotation_y) = animator.rotation();
    println!("frames:        {}", animator.frames_rendered());
    println!("particles:     {}", animator.particle_count());
    println!(
        "avg visible:   {:.1}",
        visible as f64 / f64::from(count.max(1))
    );
    println!("time:          {:.4}", animator.time());
    println!("rotation:      ({rotation_x:.6}, {rotation_y:.6})");
    println!("aspect:        {:.4}", animator.camera().aspect);

    app.unmount();
    Ok(())
}
