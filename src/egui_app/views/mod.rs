use eframe::egui;

use crate::egui_app::routes::Route;
use crate::egui_app::session::Session;
use crate::egui_app::state::{AppState, Page, Services};
use crate::egui_app::theme::{colors, styles};
use crate::shared::Role;

pub mod admin_view;
pub mod auth_view;
pub mod dashboard_view;
pub mod landing_view;
pub mod progress_view;
pub mod question_view;
pub mod quiz_view;
pub mod status_view;
pub mod syllabus_view;
pub mod teacher_view;

/// What a view asks the app to do once the frame is drawn
#[derive(Debug, Default)]
pub struct Actions {
    pub navigate: Option<Route>,
    pub logout: bool,
    pub flash: Option<String>,
}

/// Everything a page may read while drawing
pub struct ViewContext<'a> {
    pub services: &'a Services,
    pub session: &'a Session,
    pub actions: Actions,
}

impl ViewContext<'_> {
    pub fn navigate(&mut self, route: Route) {
        self.actions.navigate = Some(route);
    }

    pub fn flash(&mut self, message: impl Into<String>) {
        self.actions.flash = Some(message.into());
    }
}

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    let mut actions = Actions::default();

    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add(egui::Label::new(
                        egui::RichText::new("📚 ReviseWise").size(18.0).strong().color(colors::ACCENT),
                    ).sense(egui::Sense::click()))
                    .clicked()
                {
                    actions.navigate = Some(Route::Landing);
                }
                ui.add_space(16.0);

                for route in [Route::Syllabus, Route::About] {
                    if ui.button(route.title()).clicked() {
                        actions.navigate = Some(route);
                    }
                }
                if state.session.is_logged_in {
                    for route in menu_for(state.session.role()) {
                        if ui.button(route.title()).clicked() {
                            actions.navigate = Some(route);
                        }
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if state.session.is_logged_in {
                        if ui.button("Logout").clicked() {
                            actions.logout = true;
                        }
                        if let Some(user) = &state.session.user {
                            ui.colored_label(colors::TEXT_SECONDARY, format!("{} ({})", user.name, user.role));
                        }
                    } else {
                        if ui.button("Sign Up").clicked() {
                            actions.navigate = Some(Route::Signup);
                        }
                        if ui.button("Login").clicked() {
                            actions.navigate = Some(Route::Login);
                        }
                    }
                });
            });
        });

    state.apply(actions);
}

/// Links shown in the top bar for a logged-in user
fn menu_for(role: Option<Role>) -> Vec<Route> {
    match role {
        Some(Role::Student) => vec![Route::StudentDashboard, Route::Progress],
        Some(Role::Teacher) => vec![Route::TeacherDashboard, Route::UploadQuestion, Route::StudentProgressOverview],
        Some(Role::Admin) => vec![Route::AdminDashboard, Route::UploadQuestion, Route::StudentProgressOverview],
        Some(Role::Unknown) | None => vec![Route::Progress],
    }
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let mut cx = ViewContext {
        services: &state.services,
        session: &state.session,
        actions: Actions::default(),
    };

    egui::CentralPanel::default()
        .frame(styles::page_frame())
        .show(ctx, |ui| {
            if let Some(flash) = &state.flash {
                ui.label(egui::RichText::new(flash).color(colors::SUCCESS));
                ui.add_space(8.0);
            }

            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                match &mut state.page {
                    Page::Landing => landing_view::render(ui, &mut cx),
                    Page::Login(page) => auth_view::render_login(ui, page, &mut cx),
                    Page::Signup(page) => auth_view::render_signup(ui, page, &mut cx),
                    Page::Syllabus(page) => syllabus_view::render(ui, page, &mut cx),
                    Page::About => status_view::render_about(ui),
                    Page::ConnectionCheck(page) => status_view::render_connection(ui, page, &mut cx),
                    Page::Forbidden => status_view::render_forbidden(ui, &mut cx),
                    Page::NotFound(path) => status_view::render_not_found(ui, path, &mut cx),
                    Page::Dashboard(page) | Page::StudentDashboard(page) => {
                        dashboard_view::render(ui, page, &mut cx)
                    }
                    Page::TeacherDashboard(page) => teacher_view::render_dashboard(ui, page, &mut cx),
                    Page::StudentProgressOverview(page) => {
                        teacher_view::render_student_progress(ui, page, &mut cx)
                    }
                    Page::AdminDashboard(page) => admin_view::render(ui, page, &mut cx),
                    Page::UploadQuestion(page) => question_view::render_upload(ui, page, &mut cx),
                    Page::EditQuestion(page) => question_view::render_edit(ui, page, &mut cx),
                    Page::Quiz(page) => quiz_view::render(ui, page, &mut cx),
                    Page::Progress(page) => progress_view::render(ui, page, &mut cx),
                }
            });
        });

    let actions = cx.actions;
    state.apply(actions);
}

/// Blocking alert for class-access denials. Nothing else is clickable
/// until it is dismissed.
pub fn render_alert(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.current_alert().map(str::to_string) else {
        return;
    };

    let mut dismissed = false;
    let modal = egui::Modal::new(egui::Id::new("class_access_alert"))
        .frame(styles::modal_frame())
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.label(egui::RichText::new("⚠ Access Restricted").size(18.0).strong().color(colors::TEXT_DARK));
            ui.add_space(8.0);
            ui.label(egui::RichText::new(&message).color(colors::TEXT_DARK));
            ui.add_space(12.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed || modal.should_close() {
        state.dismiss_alert();
    }
}

/// Shared "Loading..." row
pub(crate) fn loading_row(ui: &mut egui::Ui, what: &str) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.colored_label(colors::TEXT_SECONDARY, format!("Loading {}...", what));
    });
}
