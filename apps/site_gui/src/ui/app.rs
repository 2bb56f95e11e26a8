use shared::{ContentLibrary, PageId};
use site_core::{
    chrome::LOADING_LABEL, BackgroundStatus, ContactField, Frame as ParticleFrame, NavRequest,
    Node, SiteApp, SiteSettings, SystemClock, View,
};

use crate::{
    controller::{
        events::{StatusBanner, StatusBannerSeverity, BACKGROUND_UNAVAILABLE},
        orchestration::dispatch_nav_request,
    },
    ui::host::EguiHost,
};

const PAGE_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(17, 24, 39);
const TEXT: egui::Color32 = egui::Color32::from_rgb(229, 231, 235);
const MUTED: egui::Color32 = egui::Color32::from_rgb(156, 163, 175);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);
const CARD_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(20, 26, 38, 200);
const CONTENT_WIDTH: f32 = 760.0;

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 34.0,
        2 => 26.0,
        3 => 21.0,
        _ => 18.0,
    }
}

fn particle_color(frame: &ParticleFrame) -> egui::Color32 {
    let [r, g, b] = frame.color;
    let alpha = (frame.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

pub struct SiteGuiApp {
    site: SiteApp<EguiHost>,
    status_banner: Option<StatusBanner>,
}

impl SiteGuiApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: &SiteSettings,
        library: ContentLibrary,
        initial_page: Option<PageId>,
    ) -> anyhow::Result<Self> {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let host = EguiHost::new(cc.egui_ctx.clone());
        let mut site = SiteApp::mount(host, settings, library, Box::new(SystemClock::new()))?;

        let status_banner = (site.background_status() == BackgroundStatus::Unavailable)
            .then(|| StatusBanner::info(BACKGROUND_UNAVAILABLE));

        if let Some(page) = initial_page.filter(|page| *page != PageId::Home) {
            dispatch_nav_request(&mut site, NavRequest::to(page));
        }

        Ok(Self {
            site,
            status_banner,
        })
    }

    fn paint_background(&self, ctx: &egui::Context) {
        let painter = ctx.layer_painter(egui::LayerId::background());
        painter.rect_filled(ctx.input(|i| i.screen_rect()), 0.0, PAGE_BACKGROUND);

        let Some(frame) = self.site.host().last_frame() else {
            return;
        };
        let color = particle_color(frame);
        for point in &frame.points {
            painter.circle_filled(egui::pos2(point.x, point.y), point.radius, color);
        }
    }

    fn show_header(
        &self,
        ctx: &egui::Context,
        header: &View,
        current: Option<PageId>,
        requests: &mut Vec<NavRequest>,
    ) {
        egui::TopBottomPanel::top("site_header")
            .frame(
                egui::Frame::NONE
                    .fill(CARD_FILL)
                    .inner_margin(egui::Margin::symmetric(24, 14)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let mut links = header.nodes.iter().filter_map(|node| match node {
                        Node::Link { label, request } => Some((label, request)),
                        _ => None,
                    });
                    if let Some((label, request)) = links.next() {
                        let brand = egui::RichText::new(label).size(22.0).strong().color(TEXT);
                        if ui.add(egui::Button::new(brand).frame(false)).clicked() {
                            requests.push(request.clone());
                        }
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let rest: Vec<_> = links.collect();
                        for (label, request) in rest.into_iter().rev() {
                            let active = current == Some(request.page);
                            if ui.selectable_label(active, label.as_str()).clicked() {
                                requests.push(request.clone());
                            }
                        }
                    });
                });
            });
    }

    fn show_footer(&self, ctx: &egui::Context, footer: &View, requests: &mut Vec<NavRequest>) {
        egui::TopBottomPanel::bottom("site_footer")
            .frame(
                egui::Frame::NONE
                    .fill(CARD_FILL)
                    .inner_margin(egui::Margin::symmetric(24, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for node in &footer.nodes {
                        match node {
                            Node::Muted(text) => {
                                ui.label(egui::RichText::new(text).small().color(MUTED));
                            }
                            Node::Link { label, request } => {
                                if ui.link(egui::RichText::new(label).small()).clicked() {
                                    requests.push(request.clone());
                                }
                            }
                            _ => {}
                        }
                    }
                });
            });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
                StatusBannerSeverity::Info => (
                    egui::Color32::from_rgb(40, 58, 92),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(88, 120, 180)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(12.0);
        }
    }

    fn show_page(&mut self, ctx: &egui::Context, page: &View, requests: &mut Vec<NavRequest>) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.inner_margin(egui::Margin::symmetric(24, 24)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.set_max_width(CONTENT_WIDTH);
                            ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                                self.show_status_banner(ui);
                                self.show_nodes(ui, page, requests);
                            });
                        });
                    });
            });
    }

    fn show_nodes(&mut self, ui: &mut egui::Ui, view: &View, requests: &mut Vec<NavRequest>) {
        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
        for node in &view.nodes {
            match node {
                Node::Heading { level, text } => {
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(text)
                            .size(heading_size(*level))
                            .strong()
                            .color(TEXT),
                    );
                }
                Node::Paragraph(text) => {
                    ui.label(egui::RichText::new(text).size(16.0).color(TEXT));
                }
                Node::Muted(text) => {
                    ui.label(egui::RichText::new(text).color(MUTED));
                }
                Node::List(items) => {
                    for item in items {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(egui::RichText::new("•").color(ACCENT));
                            ui.label(egui::RichText::new(item).color(TEXT));
                        });
                    }
                }
                Node::Code(code) => {
                    egui::Frame::NONE
                        .fill(egui::Color32::from_rgb(11, 15, 25))
                        .corner_radius(6.0)
                        .inner_margin(egui::Margin::same(10))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.label(egui::RichText::new(code).monospace().color(TEXT));
                        });
                }
                Node::Link { label, request } => {
                    if ui.link(egui::RichText::new(label).color(ACCENT)).clicked() {
                        requests.push(request.clone());
                    }
                }
                Node::PostEntry {
                    title,
                    date,
                    request,
                } => {
                    egui::Frame::NONE
                        .fill(CARD_FILL)
                        .corner_radius(10.0)
                        .inner_margin(egui::Margin::symmetric(16, 12))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            let title = egui::RichText::new(title).size(20.0).strong().color(TEXT);
                            if ui.link(title).clicked() {
                                requests.push(request.clone());
                            }
                            ui.label(egui::RichText::new(date).small().color(MUTED));
                        });
                }
                Node::ContactForm {
                    fields,
                    submit_label,
                } => self.show_contact_form(ui, fields, submit_label),
            }
        }
    }

    fn show_contact_form(&mut self, ui: &mut egui::Ui, fields: &[ContactField], submit_label: &str) {
        for &field in fields {
            ui.label(egui::RichText::new(field.label()).strong().color(TEXT));
            let value = self.site.contact_form_mut().field_mut(field);
            let edit = if field.is_multiline() {
                egui::TextEdit::multiline(value).desired_rows(5)
            } else {
                egui::TextEdit::singleline(value)
            };
            ui.add(edit.desired_width(f32::INFINITY));
        }

        ui.add_space(6.0);
        if ui
            .button(egui::RichText::new(submit_label).strong())
            .clicked()
        {
            if let Err(err) = self.site.submit_contact() {
                self.status_banner = Some(StatusBanner::from_error(&err));
            }
        }
    }

    /// Full-window layer above the panels; it takes the pointer so nothing
    /// underneath reacts while a transition is pending.
    fn show_loading_overlay(&self, ctx: &egui::Context, overlay: &View) {
        let rect = ctx.input(|i| i.screen_rect());
        egui::Area::new(egui::Id::new("site_loading_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(rect.min)
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(rect.size(), egui::Sense::click());
                painter.rect_filled(response.rect, 0.0, egui::Color32::from_black_alpha(150));
                painter.text(
                    response.rect.center(),
                    egui::Align2::CENTER_CENTER,
                    overlay.headings().next().unwrap_or(LOADING_LABEL),
                    egui::FontId::proportional(28.0),
                    egui::Color32::WHITE,
                );
            });
    }
}

impl eframe::App for SiteGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.site.host_mut().begin_frame();
        self.site.pump();

        let composition = self.site.compose();
        let mut requests = Vec::new();

        self.paint_background(ctx);
        self.show_header(ctx, &composition.header, composition.page.page, &mut requests);
        self.show_footer(ctx, &composition.footer, &mut requests);
        self.show_page(ctx, &composition.page, &mut requests);
        if let Some(overlay) = &composition.overlay {
            self.show_loading_overlay(ctx, overlay);
        }

        for request in requests {
            dispatch_nav_request(&mut self.site, request);
        }

        // The background requests its own repaints; otherwise wake up for the
        // pending page commit.
        if composition.background != BackgroundStatus::Active {
            if let Some(wait) = self.site.navigation().time_until_commit() {
                ctx.request_repaint_after(wait);
            }
        }
    }
}
