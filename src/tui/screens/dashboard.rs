//! Dashboard screen: statistics cards and the recent escrituras list

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::escritura::stats::DashboardStats;
use crate::models::Escritura;
use crate::tui::ui::{status_style, truncate_string, Styles};

/// Dashboard screen state
pub struct DashboardScreen {
    pub escrituras: Vec<Escritura>,
    pub stats: DashboardStats,
    pub list_state: ListState,
    pub current_page: usize,
    pub items_per_page: usize,
    pub is_loading: bool,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            escrituras: Vec::new(),
            stats: DashboardStats::default(),
            list_state: ListState::default(),
            current_page: 0,
            items_per_page: 20,
            is_loading: true,
        }
    }

    /// Replace the listing with a fresh load and recompute the cards
    pub fn set_escrituras(&mut self, escrituras: Vec<Escritura>) {
        self.stats = DashboardStats::compute(&escrituras);
        self.escrituras = escrituras;
        self.current_page = 0;
        self.is_loading = false;
        self.list_state.select(if self.escrituras.is_empty() {
            None
        } else {
            Some(0)
        });
    }

    fn get_current_page_escrituras(&self) -> Vec<&Escritura> {
        let start_idx = self.current_page * self.items_per_page;
        let end_idx = std::cmp::min(start_idx + self.items_per_page, self.escrituras.len());

        if start_idx < self.escrituras.len() {
            self.escrituras[start_idx..end_idx].iter().collect()
        } else {
            Vec::new()
        }
    }

    fn get_total_pages(&self) -> usize {
        if self.escrituras.is_empty() {
            0
        } else {
            (self.escrituras.len() + self.items_per_page - 1) / self.items_per_page
        }
    }

    /// Currently highlighted record
    pub fn selected_escritura(&self) -> Option<&Escritura> {
        self.list_state.selected().and_then(|idx| {
            let page_start = self.current_page * self.items_per_page;
            self.escrituras.get(page_start + idx)
        })
    }

    pub fn navigate_up(&mut self) {
        let page_items = self.get_current_page_escrituras();
        if page_items.is_empty() {
            return;
        }

        let current_selection = self.list_state.selected().unwrap_or(0);
        if current_selection > 0 {
            self.list_state.select(Some(current_selection - 1));
        } else if self.current_page > 0 {
            // Previous page, last item
            self.current_page -= 1;
            let new_page_items = self.get_current_page_escrituras();
            if !new_page_items.is_empty() {
                self.list_state.select(Some(new_page_items.len() - 1));
            }
        }
    }

    pub fn navigate_down(&mut self) {
        let page_items = self.get_current_page_escrituras();
        if page_items.is_empty() {
            return;
        }

        let current_selection = self.list_state.selected().unwrap_or(0);
        if current_selection < page_items.len() - 1 {
            self.list_state.select(Some(current_selection + 1));
        } else if self.current_page < self.get_total_pages() - 1 {
            // Next page, first item
            self.current_page += 1;
            self.list_state.select(Some(0));
        }
    }

    pub fn next_page(&mut self) {
        if self.get_total_pages() > 0 && self.current_page < self.get_total_pages() - 1 {
            self.current_page += 1;
            self.list_state.select(Some(0));
        }
    }

    pub fn previous_page(&mut self) {
        if self.current_page > 0 {
            self.current_page -= 1;
            self.list_state.select(Some(0));
        }
    }

    pub fn go_to_first_page(&mut self) {
        self.current_page = 0;
        self.list_state.select(if self.escrituras.is_empty() {
            None
        } else {
            Some(0)
        });
    }

    pub fn go_to_last_page(&mut self) {
        if self.get_total_pages() > 0 {
            self.current_page = self.get_total_pages() - 1;
            let page_items = self.get_current_page_escrituras();
            self.list_state.select(if page_items.is_empty() {
                None
            } else {
                Some(0)
            });
        }
    }

    /// Draw the dashboard screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(4), // Stats cards
                Constraint::Min(0),    // Listing
                Constraint::Length(4), // Instructions and pagination
            ])
            .split(area);

        // Fit the page size to the visible rows (borders plus header)
        let available_height = chunks[2].height.saturating_sub(3);
        let calculated_items_per_page = (available_height as usize).saturating_sub(1).max(10);

        if calculated_items_per_page != self.items_per_page {
            let old_page = self.current_page;
            let old_selected = self.list_state.selected();
            let old_items_per_page = self.items_per_page;

            self.items_per_page = calculated_items_per_page;

            if let Some(selected_local_idx) = old_selected {
                let global_idx = old_page * old_items_per_page + selected_local_idx;
                self.current_page = global_idx / self.items_per_page;
                let new_local_idx = global_idx % self.items_per_page;
                self.list_state.select(Some(new_local_idx));
            }
        }

        self.draw_title(f, chunks[0]);
        self.draw_stats(f, chunks[1]);
        self.draw_listing(f, chunks[2]);
        self.draw_bottom_info(f, chunks[3]);
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new("Cartório Digital - Painel de Escrituras")
            .style(Styles::title().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn draw_stats(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        draw_stat_card(f, chunks[0], "Total de Escrituras", self.stats.total, Styles::default());
        draw_stat_card(
            f,
            chunks[1],
            "Aguardando Revisão",
            self.stats.aguardando_revisao,
            Styles::warning(),
        );
        draw_stat_card(f, chunks[2], "Aprovadas", self.stats.aprovadas, Styles::success());
        draw_stat_card(f, chunks[3], "Processando", self.stats.processando, Styles::info());
    }

    fn draw_listing(&mut self, f: &mut Frame, area: Rect) {
        let page_items = self.get_current_page_escrituras();

        if page_items.is_empty() {
            let empty_message = if self.is_loading {
                "Carregando escrituras..."
            } else {
                "Nenhuma escritura encontrada."
            };

            let empty_widget = Paragraph::new(empty_message).style(Styles::inactive()).block(
                Block::default()
                    .title("Escrituras Recentes")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
            f.render_widget(empty_widget, area);
            return;
        }

        let header = ListItem::new(Line::from(vec![
            Span::styled("No.  ", Styles::title()),
            Span::styled("│ Protocolo      ", Styles::title()),
            Span::styled("│ Título                       ", Styles::title()),
            Span::styled("│ Status              ", Styles::title()),
            Span::styled("│ Criado em", Styles::title()),
        ]));

        let items: Vec<ListItem> = std::iter::once(header)
            .chain(page_items.iter().enumerate().map(|(i, escritura)| {
                let selected = Some(i) == self.list_state.selected();
                let base_style = if selected {
                    Styles::selected()
                } else {
                    Style::default()
                };
                let badge_style = if selected {
                    Styles::selected()
                } else {
                    status_style(escritura.status)
                };

                let row_number = self.current_page * self.items_per_page + i + 1;
                let prefix = format!(
                    "{:4} │ {} │ {} │ ",
                    row_number,
                    truncate_string(&escritura.numero_protocolo, 14),
                    truncate_string(&escritura.display_title(), 28),
                );
                let badge = truncate_string(escritura.status.label(), 19);
                let suffix = format!(" │ {}", escritura.criado_em.format("%d/%m/%Y %H:%M"));

                ListItem::new(Line::from(vec![
                    Span::styled(prefix, base_style),
                    Span::styled(badge, badge_style),
                    Span::styled(suffix, base_style),
                ]))
            }))
            .collect();

        let listing = List::new(items).block(
            Block::default()
                .title("Escrituras Recentes")
                .borders(Borders::ALL)
                .border_style(Styles::active_border()),
        );

        f.render_stateful_widget(listing, area, &mut self.list_state);
    }

    fn draw_bottom_info(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let instructions = vec![
            Line::from("↑/↓: Navegar | ←/→: Páginas | Enter: Revisar"),
            Line::from("n: Nova Escritura | r: Atualizar | h: Ajuda | q: Sair"),
        ];

        let instructions_widget = Paragraph::new(instructions).style(Styles::info()).block(
            Block::default()
                .title("Comandos")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(instructions_widget, chunks[0]);

        let current_page = self.current_page + 1;
        let total_pages = self.get_total_pages();
        let selected_idx = self
            .list_state
            .selected()
            .map(|idx| self.current_page * self.items_per_page + idx + 1)
            .unwrap_or(0);

        let pagination_text = if total_pages > 0 {
            format!(
                "Página {} de {}\nItem {} de {}",
                current_page,
                total_pages,
                selected_idx,
                self.escrituras.len()
            )
        } else {
            "Sem páginas".to_string()
        };

        let pagination_widget = Paragraph::new(pagination_text).style(Styles::info()).block(
            Block::default()
                .title("Navegação")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(pagination_widget, chunks[1]);
    }
}

fn draw_stat_card(f: &mut Frame, area: Rect, label: &str, value: usize, accent: Style) {
    let lines = vec![
        Line::from(Span::styled(
            value.to_string(),
            accent.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(label.to_string(), Styles::inactive())),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border()),
    );
    f.render_widget(card, area);
}
