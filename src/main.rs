use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use cartorio::cli::{Cli, Commands};
use cartorio::config::{Config, PipelineTimings};
use cartorio::escritura::attachments::{self, PdfAttachment};
use cartorio::escritura::export;
use cartorio::escritura::review;
use cartorio::escritura::submission::{self, Submission, SubmissionProgress};
use cartorio::escritura::{generator, stats::DashboardStats, EscrituraError};
use cartorio::models::{Escritura, StatusEscritura, TipoEscritura};
use cartorio::storage;
use cartorio::tui::ui::truncate_string;
use cartorio::tui::App;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "cartorio=info");
    }

    init_logging(matches!(cli.command, Commands::Tui { .. }))?;

    let mut config = Config::from_env()?;
    if let Some(database) = cli.database.clone() {
        config.database_path = database;
    }
    config.validate()?;

    match cli.command {
        Commands::Tui { id } => run_tui(config, id).await,
        command => run_command(command, &config).await,
    }
}

/// The TUI owns the terminal, so its logs go to a file only. Batch commands
/// log to stderr and the file like a regular CLI.
fn init_logging(tui_mode: bool) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    if tui_mode {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("cartorio_tui.log")?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_ansi(false)
            .init();
    } else {
        let file_appender = tracing_appender::rolling::never(".", "cartorio.log");

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_filter(EnvFilter::from_default_env()),
            )
            .with(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_filter(EnvFilter::from_default_env()),
            )
            .init();
    }

    Ok(())
}

async fn run_tui(config: Config, startup_id: Option<String>) -> Result<()> {
    info!("Starting cartório TUI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config)?;
    if let Some(id) = startup_id {
        app.open_review(Some(id)).await;
    }

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => {
            info!("TUI exited successfully");
        }
        Err(e) => {
            error!("TUI encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Nova {
            tipo,
            tipo_outro,
            partes,
            valor,
            observacoes,
            documento,
            pasta,
        } => {
            let tipo = Commands::parse_tipo(&tipo)?;
            let mut submission = Submission {
                tipo: Some(tipo),
                tipo_outro: tipo_outro.unwrap_or_default(),
                partes_envolvidas: partes,
                valor_negocio: valor,
                observacoes: observacoes.unwrap_or_default(),
                anexos: Vec::new(),
            };

            for path in documento {
                submission.add_attachment(PdfAttachment::load(path)?)?;
            }
            if let Some(dir) = pasta {
                for anexo in attachments::collect_from_dir(&dir)? {
                    submission.add_attachment(anexo)?;
                }
            }
            submission.validate()?;

            info!(
                "Submitting escritura with {} attachment(s)",
                submission.anexos.len()
            );

            // Batch mode skips the interactive pauses
            let mut rx = submission::start(
                config.database_path_str().to_string(),
                config.attachments_dir.clone(),
                submission,
                PipelineTimings::zero(),
            );
            while let Some(update) = rx.recv().await {
                match update {
                    SubmissionProgress::Complete {
                        id,
                        numero_protocolo,
                    } => {
                        println!("Escritura {} criada (id: {})", numero_protocolo, id);
                        println!("Status: {}", StatusEscritura::AguardandoRevisao.as_str());
                    }
                    SubmissionProgress::Failed { message } => {
                        anyhow::bail!(message);
                    }
                    update => println!("{}% concluído", update.percent()),
                }
            }
        }

        Commands::Listar { limit } => {
            let escrituras = storage::list_recent(config.database_path_str(), limit).await?;
            let stats = DashboardStats::compute(&escrituras);

            println!(
                "Total: {} | Aguardando Revisão: {} | Aprovadas: {} | Processando: {}",
                stats.total, stats.aguardando_revisao, stats.aprovadas, stats.processando
            );
            println!();
            println!(
                "{:<36} {:<15} {:<30} {:<20} {:<17}",
                "ID", "Protocolo", "Tipo", "Status", "Criado em"
            );
            println!("{}", "-".repeat(120));

            for escritura in &escrituras {
                println!(
                    "{:<36} {:<15} {:<30} {:<20} {:<17}",
                    escritura.id,
                    escritura.numero_protocolo,
                    truncate_string(&escritura.display_title(), 28),
                    escritura.status.label(),
                    escritura.criado_em.format("%d/%m/%Y %H:%M")
                );
            }
        }

        Commands::Aprovar { id } => {
            let mut escritura = storage::get_escritura(config.database_path_str(), &id)
                .await?
                .ok_or_else(|| EscrituraError::NotFound(id.clone()))?;

            let conteudo = escritura.conteudo_gerado.clone();
            review::approve(&mut escritura, &config.reviewer, &conteudo, Utc::now())?;
            storage::save_escritura(&escritura, config.database_path_str()).await?;

            println!(
                "Escritura {} aprovada por {}",
                escritura.numero_protocolo, config.reviewer.email
            );
        }

        Commands::Rejeitar { id, motivo } => {
            let mut escritura = storage::get_escritura(config.database_path_str(), &id)
                .await?
                .ok_or_else(|| EscrituraError::NotFound(id.clone()))?;

            review::reject(&mut escritura, &config.reviewer, &motivo, Utc::now())?;
            storage::save_escritura(&escritura, config.database_path_str()).await?;

            println!("Escritura {} rejeitada", escritura.numero_protocolo);
        }

        Commands::Exportar { id, saida } => {
            let escritura = storage::get_escritura(config.database_path_str(), &id)
                .await?
                .ok_or_else(|| EscrituraError::NotFound(id.clone()))?;

            let dir = saida.unwrap_or_else(|| config.export_dir.clone());
            let path = export::export_text(
                &dir,
                &escritura.numero_protocolo,
                &escritura.conteudo_gerado,
            )?;
            println!("Escritura exportada para {}", path.display());
        }

        Commands::Seed => {
            let count = seed_demo_records(config).await?;
            println!("{} escrituras de demonstração criadas", count);
        }

        Commands::Tui { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

/// A handful of records across every workflow status, so the dashboard and
/// review screens have something to show on a fresh database.
async fn seed_demo_records(config: &Config) -> Result<usize> {
    let demos = [
        (
            TipoEscritura::CompraVenda,
            "João Silva e Maria Santos",
            Some(500000.0),
            StatusEscritura::AguardandoRevisao,
        ),
        (
            TipoEscritura::Doacao,
            "Carlos Pereira e Ana Pereira",
            Some(150000.0),
            StatusEscritura::Processando,
        ),
        (
            TipoEscritura::UniaoEstavel,
            "Pedro Costa e Juliana Lima",
            None,
            StatusEscritura::Aprovada,
        ),
        (
            TipoEscritura::Divorcio,
            "Roberto Alves e Fernanda Alves",
            None,
            StatusEscritura::Rejeitada,
        ),
        (
            TipoEscritura::InventarioPartilha,
            "Espólio de José Oliveira",
            Some(820000.0),
            StatusEscritura::EmRevisao,
        ),
    ];

    let count = demos.len();
    for (index, (tipo, partes, valor, status)) in demos.into_iter().enumerate() {
        let criado_em = Utc::now() - Duration::hours(index as i64 * 6);
        let mut escritura =
            Escritura::new(tipo, submission::protocol_number(criado_em), criado_em);
        escritura.partes_envolvidas = partes.to_string();
        escritura.valor_negocio = valor;
        escritura.status = status;
        escritura.documentos_urls = vec![format!("anexos/demo/{}-certidao.pdf", index + 1)];

        if status != StatusEscritura::Processando {
            let anexos = [PdfAttachment {
                path: escritura.documentos_urls[0].clone().into(),
                file_name: "certidao.pdf".to_string(),
                size_bytes: 2 * 1024 * 1024,
                pages: 3,
            }];
            escritura.conteudo_gerado = generator::draft(&escritura, &anexos);
        }
        if status.is_terminal() {
            escritura.revisado_por = Some(config.reviewer.email.clone());
            escritura.data_revisao = Some(criado_em + Duration::hours(2));
        }
        if status == StatusEscritura::Rejeitada {
            escritura.motivo_rejeicao = Some("Certidão de matrícula desatualizada".to_string());
        }

        storage::save_escritura(&escritura, config.database_path_str()).await?;
    }

    Ok(count)
}
