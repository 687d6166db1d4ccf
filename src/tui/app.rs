//! Application shell: screen routing, key handling, and the render loop

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::config::Config;
use crate::escritura::attachments::{PdfAttachment, MAX_ATTACHMENTS};
use crate::escritura::export;
use crate::escritura::review;
use crate::escritura::submission::{self, SubmissionProgress};
use crate::storage;
use crate::tui::screens::{
    AjudaScreen, DashboardScreen, LoadState, NovaEscrituraScreen, NovaField, RevisaoScreen,
};
use crate::tui::ui::{centered_rect, Styles};

/// TUI screens
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Dashboard,
    NovaEscritura,
    Revisao,
    Ajuda,
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: Screen,
    /// Previous screen for navigation
    pub previous_screen: Option<Screen>,
    /// Application configuration
    pub config: Config,

    // Screen states
    pub dashboard: DashboardScreen,
    pub nova: NovaEscrituraScreen,
    pub revisao: RevisaoScreen,
    pub ajuda: AjudaScreen,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,

    // A dashboard return scheduled shortly ahead. The pause lets the clerk
    // read the completion or approval state before the view moves on.
    pending_dashboard: Option<Instant>,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            current_screen: Screen::Dashboard,
            previous_screen: None,
            config,

            dashboard: DashboardScreen::new(),
            nova: NovaEscrituraScreen::new(),
            revisao: RevisaoScreen::new(),
            ajuda: AjudaScreen::new(),

            should_quit: false,
            show_help_popup: false,
            status_message: None,
            error_message: None,

            pending_dashboard: None,
        })
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.reload_dashboard().await;

        loop {
            // Draw the UI
            terminal.draw(|f| self.draw(f))?;

            // Poll with a timeout so the submission gauge and deferred
            // navigation keep moving while no key is pressed
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key).await?;
                    }
                }
            }

            self.tick().await;

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Drain pipeline progress updates and fire due navigations
    async fn tick(&mut self) {
        let mut updates = Vec::new();
        if let Some(rx) = &mut self.nova.progress_rx {
            while let Ok(update) = rx.try_recv() {
                updates.push(update);
            }
        }

        for update in updates {
            match update {
                SubmissionProgress::Complete {
                    id,
                    numero_protocolo,
                } => {
                    self.set_status(format!(
                        "Escritura {} processada com sucesso",
                        numero_protocolo
                    ));
                    self.nova.progress = Some(SubmissionProgress::Complete {
                        id,
                        numero_protocolo,
                    });
                    self.nova.progress_rx = None;
                    self.pending_dashboard =
                        Some(Instant::now() + self.config.completion_delay());
                }
                SubmissionProgress::Failed { message } => {
                    self.nova.is_processing = false;
                    self.nova.progress = None;
                    self.nova.progress_rx = None;
                    self.set_error(message);
                }
                update => self.nova.progress = Some(update),
            }
        }

        let due = matches!(self.pending_dashboard, Some(at) if Instant::now() >= at);
        if due {
            self.pending_dashboard = None;
            if self.nova.is_processing {
                self.nova.reset();
            }
            self.reload_dashboard().await;
            self.navigate_to_screen(Screen::Dashboard);
        }
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Global shortcuts
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }
        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return Ok(());
            }
            KeyCode::Esc if self.show_help_popup => {
                self.show_help_popup = false;
                return Ok(());
            }
            _ => {}
        }

        // Screen-specific event handling
        if !self.show_help_popup {
            match self.current_screen {
                Screen::Dashboard => self.handle_dashboard_event(key).await?,
                Screen::NovaEscritura => self.handle_nova_event(key).await?,
                Screen::Revisao => self.handle_revisao_event(key).await?,
                Screen::Ajuda => self.handle_ajuda_event(key).await?,
            }
        }

        Ok(())
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        match self.current_screen {
            Screen::Dashboard => self.dashboard.draw(f, chunks[0]),
            Screen::NovaEscritura => self.nova.draw(f, chunks[0]),
            Screen::Revisao => self.revisao.draw(f, chunks[0]),
            Screen::Ajuda => self.ajuda.draw(f, chunks[0]),
        }

        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Draw status bar with current screen info and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let (text, style) = if let Some(ref err) = self.error_message {
            (format!("Erro: {}", err), Styles::error())
        } else if let Some(ref msg) = self.status_message {
            (msg.clone(), Styles::success())
        } else {
            (
                format!(
                    "Cartório Digital - {} | F1: Ajuda | Ctrl+C: Sair",
                    match self.current_screen {
                        Screen::Dashboard => "Painel de Escrituras",
                        Screen::NovaEscritura => "Nova Escritura",
                        Screen::Revisao => "Revisão de Escritura",
                        Screen::Ajuda => "Ajuda",
                    }
                ),
                Styles::info(),
            )
        };

        let status_bar = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status_bar, area);
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 70, area);
        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .block(
                Block::default()
                    .title("Ajuda - Atalhos")
                    .borders(Borders::ALL)
                    .border_style(Styles::warning()),
            )
            .wrap(ratatui::widgets::Wrap { trim: false });
        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    fn get_context_help(&self) -> String {
        let global_help = "Atalhos globais:\n\
            F1 - Mostrar/ocultar esta ajuda\n\
            Ctrl+C - Sair\n\n";

        let screen_help = match self.current_screen {
            Screen::Dashboard => {
                "Painel de Escrituras:\n\
                ↑/↓ - Selecionar escritura\n\
                ←/→ - Página anterior/próxima\n\
                Enter - Abrir revisão\n\
                n - Nova escritura\n\
                r - Recarregar\n\
                h - Tela de ajuda\n\
                q - Sair"
            }
            Screen::NovaEscritura => {
                "Nova Escritura:\n\
                Tab/Shift+Tab - Navegar campos\n\
                Enter - Escolher tipo / anexar / avançar\n\
                ←/→ e Del - Selecionar e remover anexos\n\
                Ctrl+E - Gerar Escritura com IA\n\
                Esc - Cancelar"
            }
            Screen::Revisao => {
                "Revisão de Escritura:\n\
                ↑/↓ - Rolar conteúdo\n\
                e - Editar | Ctrl+S - Salvar edição\n\
                a - Aprovar | r - Rejeitar\n\
                b - Baixar arquivo de texto\n\
                Esc - Voltar ao painel"
            }
            Screen::Ajuda => {
                "Ajuda:\n\
                ↑/↓ - Rolar\n\
                Esc - Voltar"
            }
        };

        format!("{}{}\n\nEsc para fechar", global_help, screen_help)
    }

    /// Navigate to a specific screen
    pub fn navigate_to_screen(&mut self, screen: Screen) {
        self.previous_screen = Some(self.current_screen.clone());
        self.current_screen = screen;
        self.clear_messages();
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    /// Reload the dashboard listing from the database
    pub async fn reload_dashboard(&mut self) {
        self.dashboard.is_loading = true;
        match storage::list_recent(self.config.database_path_str(), 200).await {
            Ok(escrituras) => self.dashboard.set_escrituras(escrituras),
            Err(e) => {
                self.dashboard.is_loading = false;
                self.set_error(format!("Falha ao carregar escrituras: {}", e));
            }
        }
    }

    /// Open the review screen for the given record id. A missing id and an
    /// unknown id each render their own message instead of a record.
    pub async fn open_review(&mut self, id: Option<String>) {
        self.revisao.reset();
        self.navigate_to_screen(Screen::Revisao);

        let id = match id {
            Some(id) => id,
            None => {
                self.revisao.mark_missing_id();
                return;
            }
        };

        match storage::get_escritura(self.config.database_path_str(), &id).await {
            Ok(Some(escritura)) => self.revisao.set_escritura(escritura),
            Ok(None) => self.revisao.mark_not_found(),
            Err(e) => {
                self.revisao.mark_not_found();
                self.set_error(format!("Falha ao carregar escritura: {}", e));
            }
        }
    }

    // Event handlers for each screen

    async fn handle_dashboard_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up => self.dashboard.navigate_up(),
            KeyCode::Down => self.dashboard.navigate_down(),
            KeyCode::Left => self.dashboard.previous_page(),
            KeyCode::Right => self.dashboard.next_page(),
            KeyCode::Home => self.dashboard.go_to_first_page(),
            KeyCode::End => self.dashboard.go_to_last_page(),
            KeyCode::Enter => {
                let id = self.dashboard.selected_escritura().map(|e| e.id.clone());
                if let Some(id) = id {
                    self.open_review(Some(id)).await;
                }
            }
            KeyCode::Char('n') => {
                self.nova.reset();
                self.navigate_to_screen(Screen::NovaEscritura);
            }
            KeyCode::Char('r') => {
                self.reload_dashboard().await;
                self.set_status("Lista recarregada".to_string());
            }
            KeyCode::Char('h') => self.navigate_to_screen(Screen::Ajuda),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
        Ok(())
    }

    async fn handle_nova_event(&mut self, key: KeyEvent) -> Result<()> {
        // The pipeline runs to completion once started
        if self.nova.is_processing {
            return Ok(());
        }

        if self.nova.show_tipo_dropdown {
            match key.code {
                KeyCode::Up => self.nova.tipo_list.previous(),
                KeyCode::Down => self.nova.tipo_list.next(),
                KeyCode::Enter => {
                    self.nova.show_tipo_dropdown = false;
                    self.nova.rebuild_fields();
                }
                KeyCode::Esc => self.nova.show_tipo_dropdown = false,
                _ => {}
            }
            return Ok(());
        }

        if self.nova.show_file_input {
            match key.code {
                KeyCode::Enter => self.attach_file_from_input(),
                KeyCode::Esc => {
                    self.nova.show_file_input = false;
                    self.nova.file_path_input.clear();
                    self.nova.file_path_input.set_focus(false);
                }
                KeyCode::Char(c) => self.nova.file_path_input.insert_char(c),
                KeyCode::Backspace => self.nova.file_path_input.delete_char(),
                KeyCode::Delete => self.nova.file_path_input.delete_char_forward(),
                KeyCode::Left => self.nova.file_path_input.move_cursor_left(),
                KeyCode::Right => self.nova.file_path_input.move_cursor_right(),
                KeyCode::Home => self.nova.file_path_input.move_cursor_to_start(),
                KeyCode::End => self.nova.file_path_input.move_cursor_to_end(),
                _ => {}
            }
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('e') {
            self.submit_nova();
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => self.nova.next_field(),
            KeyCode::BackTab => self.nova.previous_field(),
            KeyCode::Up => self.nova.focus_up(),
            KeyCode::Down => self.nova.focus_down(),
            KeyCode::Enter => match self.nova.current() {
                NovaField::Tipo => self.nova.show_tipo_dropdown = true,
                NovaField::Documentos => self.open_file_input(),
                _ => self.nova.next_field(),
            },
            KeyCode::Esc => {
                self.navigate_to_screen(Screen::Dashboard);
                self.reload_dashboard().await;
            }
            KeyCode::Left if self.nova.current() == NovaField::Documentos => {
                self.nova.select_anexo_left()
            }
            KeyCode::Right if self.nova.current() == NovaField::Documentos => {
                self.nova.select_anexo_right()
            }
            KeyCode::Delete if self.nova.current() == NovaField::Documentos => {
                self.nova.remove_selected_anexo()
            }
            KeyCode::Char('a') if self.nova.current() == NovaField::Documentos => {
                self.open_file_input()
            }
            KeyCode::Char(c) => self.nova.handle_char_input(c),
            KeyCode::Backspace => self.nova.handle_backspace(),
            KeyCode::Delete => self.nova.handle_delete(),
            KeyCode::Left => self.nova.handle_cursor_left(),
            KeyCode::Right => self.nova.handle_cursor_right(),
            KeyCode::Home => self.nova.handle_cursor_home(),
            KeyCode::End => self.nova.handle_cursor_end(),
            _ => {}
        }
        Ok(())
    }

    fn open_file_input(&mut self) {
        self.nova.file_path_input.clear();
        self.nova.file_path_input.set_focus(true);
        self.nova.show_file_input = true;
    }

    fn attach_file_from_input(&mut self) {
        let path = self.nova.file_path_input.value.trim().to_string();
        if path.is_empty() {
            self.set_error("Informe o caminho do arquivo PDF".to_string());
            return;
        }
        if self.nova.anexos.len() >= MAX_ATTACHMENTS {
            self.set_error(
                crate::escritura::EscrituraError::TooManyAttachments {
                    limit: MAX_ATTACHMENTS,
                }
                .to_string(),
            );
            return;
        }

        match PdfAttachment::load(path) {
            Ok(attachment) => {
                self.nova.anexos.push(attachment);
                self.nova.selected_anexo = self.nova.anexos.len() - 1;
                self.nova.show_file_input = false;
                self.nova.file_path_input.clear();
                self.nova.file_path_input.set_focus(false);
                self.clear_messages();
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn submit_nova(&mut self) {
        let submission = match self.nova.build_submission() {
            Ok(submission) => submission,
            Err(message) => {
                self.set_error(message);
                return;
            }
        };
        if let Err(e) = submission.validate() {
            self.set_error(e.to_string());
            return;
        }

        self.clear_messages();
        let rx = submission::start(
            self.config.database_path_str().to_string(),
            self.config.attachments_dir.clone(),
            submission,
            self.config.timings.clone(),
        );
        self.nova.progress = None;
        self.nova.progress_rx = Some(rx);
        self.nova.is_processing = true;
    }

    async fn handle_revisao_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.revisao.state != LoadState::Ready {
            if key.code == KeyCode::Esc {
                self.navigate_to_screen(Screen::Dashboard);
                self.reload_dashboard().await;
            }
            return Ok(());
        }

        if self.revisao.show_reject_dialog {
            match key.code {
                KeyCode::Enter => self.confirm_reject().await,
                KeyCode::Esc => self.revisao.close_reject_dialog(),
                KeyCode::Char(c) => self.revisao.reject_input.insert_char(c),
                KeyCode::Backspace => self.revisao.reject_input.delete_char(),
                KeyCode::Delete => self.revisao.reject_input.delete_char_forward(),
                KeyCode::Left => self.revisao.reject_input.move_cursor_left(),
                KeyCode::Right => self.revisao.reject_input.move_cursor_right(),
                KeyCode::Home => self.revisao.reject_input.move_cursor_to_start(),
                KeyCode::End => self.revisao.reject_input.move_cursor_to_end(),
                _ => {}
            }
            return Ok(());
        }

        if self.revisao.is_editing {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
                self.save_review_edit().await;
                return Ok(());
            }
            match key.code {
                KeyCode::Esc => self.revisao.stop_editing(),
                KeyCode::Enter => self.revisao.editor.insert_newline(),
                KeyCode::Char(c) => self.revisao.editor.insert_char(c),
                KeyCode::Backspace => self.revisao.editor.backspace(),
                KeyCode::Delete => self.revisao.editor.delete_forward(),
                KeyCode::Left => self.revisao.editor.move_left(),
                KeyCode::Right => self.revisao.editor.move_right(),
                KeyCode::Up => self.revisao.editor.move_up(),
                KeyCode::Down => self.revisao.editor.move_down(),
                KeyCode::Home => self.revisao.editor.move_line_start(),
                KeyCode::End => self.revisao.editor.move_line_end(),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Up => {
                self.revisao.scroll_offset = self.revisao.scroll_offset.saturating_sub(1)
            }
            KeyCode::Down => {
                let max = self
                    .revisao
                    .escritura
                    .as_ref()
                    .map(|e| e.conteudo_gerado.lines().count().saturating_sub(1))
                    .unwrap_or(0);
                if self.revisao.scroll_offset < max {
                    self.revisao.scroll_offset += 1;
                }
            }
            KeyCode::Char('e') if self.revisao.can_review() => self.revisao.start_editing(),
            KeyCode::Char('a') if self.revisao.can_review() => self.approve_review().await,
            KeyCode::Char('r') if self.revisao.can_review() => self.revisao.open_reject_dialog(),
            KeyCode::Char('b') => self.export_review(),
            KeyCode::Esc => {
                self.navigate_to_screen(Screen::Dashboard);
                self.reload_dashboard().await;
            }
            _ => {}
        }
        Ok(())
    }

    async fn save_review_edit(&mut self) {
        let edited = self.revisao.editor.text();
        let result = match self.revisao.escritura.as_mut() {
            Some(escritura) => review::save_edit(escritura, &edited).map(|_| escritura.clone()),
            None => return,
        };

        match result {
            Ok(record) => {
                match storage::save_escritura(&record, self.config.database_path_str()).await {
                    Ok(()) => {
                        self.revisao.stop_editing();
                        self.set_status("Alterações salvas".to_string());
                    }
                    Err(e) => self.set_error(format!("Falha ao salvar: {}", e)),
                }
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    async fn approve_review(&mut self) {
        let reviewer = self.config.reviewer.clone();
        let agora = Utc::now();
        let result = match self.revisao.escritura.as_mut() {
            Some(escritura) => {
                let conteudo = escritura.conteudo_gerado.clone();
                review::approve(escritura, &reviewer, &conteudo, agora).map(|_| escritura.clone())
            }
            None => return,
        };

        match result {
            Ok(record) => {
                match storage::save_escritura(&record, self.config.database_path_str()).await {
                    Ok(()) => {
                        self.set_status(format!("Escritura {} aprovada", record.numero_protocolo));
                        self.pending_dashboard =
                            Some(Instant::now() + self.config.completion_delay());
                    }
                    Err(e) => self.set_error(format!("Falha ao salvar: {}", e)),
                }
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    async fn confirm_reject(&mut self) {
        let motivo = self.revisao.reject_input.value.clone();
        let reviewer = self.config.reviewer.clone();
        let agora = Utc::now();
        let result = match self.revisao.escritura.as_mut() {
            Some(escritura) => {
                review::reject(escritura, &reviewer, &motivo, agora).map(|_| escritura.clone())
            }
            None => return,
        };

        match result {
            Ok(record) => {
                match storage::save_escritura(&record, self.config.database_path_str()).await {
                    Ok(()) => {
                        self.revisao.close_reject_dialog();
                        self.set_status(format!("Escritura {} rejeitada", record.numero_protocolo));
                        self.pending_dashboard =
                            Some(Instant::now() + self.config.completion_delay());
                    }
                    Err(e) => self.set_error(format!("Falha ao salvar: {}", e)),
                }
            }
            // An empty motivo keeps the dialog open with the message below
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn export_review(&mut self) {
        let escritura = match &self.revisao.escritura {
            Some(e) => e,
            None => return,
        };

        match export::export_text(
            &self.config.export_dir,
            &escritura.numero_protocolo,
            &escritura.conteudo_gerado,
        ) {
            Ok(path) => self.set_status(format!("Escritura exportada para {}", path.display())),
            Err(e) => self.set_error(format!("Falha ao exportar: {}", e)),
        }
    }

    async fn handle_ajuda_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up => self.ajuda.scroll_up(),
            KeyCode::Down => self.ajuda.scroll_down(),
            KeyCode::Esc => self.navigate_to_screen(Screen::Dashboard),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineTimings;
    use crate::escritura::review::Reviewer;
    use crate::models::TipoEscritura;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        Config {
            database_path: dir.path().join("cartorio.db"),
            export_dir: dir.path().join("exportados"),
            attachments_dir: dir.path().join("anexos"),
            reviewer: Reviewer {
                full_name: "Tabelião de Teste".to_string(),
                email: "tabeliao@cartorio.test".to_string(),
            },
            timings: PipelineTimings::zero(),
        }
    }

    #[tokio::test]
    async fn submit_without_tipo_reports_validation_error() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(test_config(&dir)).unwrap();

        app.navigate_to_screen(Screen::NovaEscritura);
        app.submit_nova();

        assert!(!app.nova.is_processing);
        assert_eq!(
            app.error_message.as_deref(),
            Some("Por favor, selecione o tipo de escritura")
        );
    }

    #[tokio::test]
    async fn submission_completes_and_returns_to_dashboard() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(test_config(&dir)).unwrap();

        app.navigate_to_screen(Screen::NovaEscritura);
        let compra = TipoEscritura::all()
            .iter()
            .position(|t| *t == TipoEscritura::CompraVenda)
            .unwrap();
        app.nova.tipo_list.select(Some(compra));
        app.nova.rebuild_fields();

        let pdf = dir.path().join("contrato.pdf");
        crate::escritura::attachments::write_minimal_pdf(&pdf);
        app.nova.anexos.push(PdfAttachment::load(&pdf).unwrap());

        app.submit_nova();
        assert!(app.nova.is_processing);

        // Zeroed timings finish the pipeline almost immediately
        for _ in 0..50 {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            app.tick().await;
            if app.current_screen == Screen::Dashboard {
                break;
            }
        }

        assert_eq!(app.current_screen, Screen::Dashboard);
        assert!(!app.nova.is_processing);
        assert_eq!(app.dashboard.escrituras.len(), 1);
        let escritura = &app.dashboard.escrituras[0];
        assert_eq!(escritura.tipo, TipoEscritura::CompraVenda);
        assert_eq!(
            escritura.status,
            crate::models::StatusEscritura::AguardandoRevisao
        );
        assert_eq!(escritura.documentos_urls.len(), 1);
    }

    #[tokio::test]
    async fn approve_from_review_schedules_dashboard_return() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(test_config(&dir)).unwrap();

        let mut escritura = crate::models::Escritura::new(
            TipoEscritura::Doacao,
            "PROT-000000042",
            Utc::now(),
        );
        escritura.status = crate::models::StatusEscritura::AguardandoRevisao;
        escritura.conteudo_gerado = "Minuta".to_string();
        storage::save_escritura(&escritura, app.config.database_path_str())
            .await
            .unwrap();

        app.open_review(Some(escritura.id.clone())).await;
        assert_eq!(app.revisao.state, LoadState::Ready);
        assert!(app.revisao.can_review());

        app.approve_review().await;
        assert!(!app.revisao.can_review());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Escritura PROT-000000042 aprovada")
        );

        app.tick().await;
        assert_eq!(app.current_screen, Screen::Dashboard);

        let saved = storage::get_escritura(app.config.database_path_str(), &escritura.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.status, crate::models::StatusEscritura::Aprovada);
        assert_eq!(saved.revisado_por.as_deref(), Some("tabeliao@cartorio.test"));
    }

    #[tokio::test]
    async fn reject_requires_a_motivo() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(test_config(&dir)).unwrap();

        let mut escritura = crate::models::Escritura::new(
            TipoEscritura::InventarioPartilha,
            "PROT-000000043",
            Utc::now(),
        );
        escritura.status = crate::models::StatusEscritura::AguardandoRevisao;
        storage::save_escritura(&escritura, app.config.database_path_str())
            .await
            .unwrap();

        app.open_review(Some(escritura.id.clone())).await;
        app.revisao.open_reject_dialog();

        app.confirm_reject().await;
        assert!(app.revisao.show_reject_dialog);
        assert!(app.error_message.is_some());

        for c in "Falta certidão".chars() {
            app.revisao.reject_input.insert_char(c);
        }
        app.confirm_reject().await;
        assert!(!app.revisao.show_reject_dialog);

        let saved = storage::get_escritura(app.config.database_path_str(), &escritura.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.status, crate::models::StatusEscritura::Rejeitada);
        assert_eq!(saved.motivo_rejeicao.as_deref(), Some("Falta certidão"));
    }

    #[tokio::test]
    async fn open_review_without_id_marks_missing() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(test_config(&dir)).unwrap();

        app.open_review(None).await;
        assert_eq!(app.current_screen, Screen::Revisao);
        assert_eq!(app.revisao.state, LoadState::MissingId);

        app.open_review(Some("inexistente".to_string())).await;
        assert_eq!(app.revisao.state, LoadState::NotFound);
    }
}
