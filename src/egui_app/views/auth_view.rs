use eframe::egui;

use crate::egui_app::auth::{
    self, describe_login_error, describe_signup_error, AuthError, AuthState, LoginForm, SignupForm,
};
use crate::egui_app::routes::Route;
use crate::egui_app::tasks::Pending;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::ViewContext;
use crate::shared::models::SignupResponse;
use crate::shared::syllabus::classes;
use crate::shared::{Role, UserProfile};

const INPUT_WIDTH: f32 = 280.0;
const LABEL_WIDTH: f32 = 90.0;

#[derive(Default)]
pub struct LoginPage {
    pub form: LoginForm,
    pub status: AuthState,
    request: Pending<Result<(UserProfile, Route), AuthError>>,
}

#[derive(Default)]
pub struct SignupPage {
    pub form: SignupForm,
    pub status: AuthState,
    request: Pending<Result<SignupResponse, AuthError>>,
}

impl LoginPage {
    pub fn submit(&mut self, cx: &ViewContext) {
        if let Err(e) = self.form.validate() {
            self.status.set_error(e.to_string());
            return;
        }
        self.status = AuthState {
            loading: true,
            ..AuthState::default()
        };

        let email = self.form.email.clone();
        let password = self.form.password.clone();
        self.request = cx.services.spawn(move |api| auth::login(api, email, password));
    }
}

impl SignupPage {
    pub fn submit(&mut self, cx: &ViewContext) {
        if let Err(e) = self.form.validate() {
            self.status.set_error(e.to_string());
            return;
        }
        self.status = AuthState {
            loading: true,
            ..AuthState::default()
        };

        let request = self.form.to_request();
        self.request = cx.services.spawn(move |api| auth::signup(api, request));
    }
}

fn field(ui: &mut egui::Ui, label: &str, value: &mut String, password: bool) {
    ui.horizontal(|ui| {
        ui.add_space((ui.available_width() - INPUT_WIDTH - LABEL_WIDTH - 20.0).max(0.0) / 2.0);
        ui.add_sized(
            [LABEL_WIDTH, 24.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        ui.add_sized(
            [INPUT_WIDTH, 28.0],
            egui::TextEdit::singleline(value).password(password).text_color(colors::TEXT_LIGHT),
        );
    });
    ui.add_space(8.0);
}

pub fn render_login(ui: &mut egui::Ui, page: &mut LoginPage, cx: &mut ViewContext) {
    if let Some(result) = page.request.poll() {
        page.status.loading = false;
        match result {
            Ok((user, next)) => {
                tracing::info!(target: "revisewise::ui", user_id = user.id, "logged in");
                page.form.password.clear();
                cx.navigate(next);
                cx.flash(format!("Welcome, {}!", user.name));
            }
            Err(e) => {
                tracing::warn!(target: "revisewise::ui", error = %e, "login failed");
                page.status.set_error(describe_login_error(&e));
            }
        }
    }

    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(styles::heading("Welcome Back"));
        ui.add_space(20.0);

        styles::status_line(ui, page.status.error.as_deref(), page.status.notice.as_deref());
        ui.add_space(10.0);

        field(ui, "Email:", &mut page.form.email, false);
        field(ui, "Password:", &mut page.form.password, true);
        ui.add_space(12.0);

        let submit = ui.add_enabled(!page.status.loading, styles::primary_button("Login"));
        let pressed_enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if submit.clicked() || (pressed_enter && !page.status.loading) {
            page.submit(cx);
        }

        ui.add_space(10.0);
        if ui.link("Don't have an account? Sign up").clicked() {
            cx.navigate(Route::Signup);
        }

        if page.status.loading {
            ui.add_space(15.0);
            ui.horizontal(|ui| {
                ui.add_space((ui.available_width() - 100.0).max(0.0) / 2.0);
                ui.label(egui::RichText::new("Logging in...").color(colors::TEXT_LIGHT));
                ui.spinner();
            });
        }
    });
}

pub fn render_signup(ui: &mut egui::Ui, page: &mut SignupPage, cx: &mut ViewContext) {
    if let Some(result) = page.request.poll() {
        page.status.loading = false;
        match result {
            Ok(response) => {
                cx.navigate(Route::Login);
                cx.flash(format!("{} (User ID: {}). Please log in.", response.message, response.user_id));
            }
            Err(e) => {
                tracing::warn!(target: "revisewise::ui", error = %e, "signup failed");
                page.status.set_error(describe_signup_error(&e));
            }
        }
    }

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);
        ui.label(styles::heading("Create Account"));
        ui.add_space(20.0);

        styles::status_line(ui, page.status.error.as_deref(), page.status.notice.as_deref());
        ui.add_space(10.0);

        field(ui, "Name:", &mut page.form.name, false);
        field(ui, "Email:", &mut page.form.email, false);
        field(ui, "Password:", &mut page.form.password, true);
        field(ui, "Confirm:", &mut page.form.confirm_password, true);

        ui.horizontal(|ui| {
            ui.add_space((ui.available_width() - INPUT_WIDTH - LABEL_WIDTH - 20.0).max(0.0) / 2.0);
            ui.add_sized(
                [LABEL_WIDTH, 24.0],
                egui::Label::new(egui::RichText::new("Role:").color(colors::TEXT_SECONDARY)),
            );
            for role in Role::ALL {
                ui.radio_value(&mut page.form.role, role, role.as_str());
            }
        });
        ui.add_space(8.0);

        if page.form.role == Role::Student {
            ui.horizontal(|ui| {
                ui.add_space((ui.available_width() - INPUT_WIDTH - LABEL_WIDTH - 20.0).max(0.0) / 2.0);
                ui.add_sized(
                    [LABEL_WIDTH, 24.0],
                    egui::Label::new(egui::RichText::new("Class:").color(colors::TEXT_SECONDARY)),
                );
                egui::ComboBox::from_id_salt("signup_class")
                    .selected_text(page.form.student_class.clone())
                    .width(INPUT_WIDTH)
                    .show_ui(ui, |ui| {
                        for class in classes() {
                            let label = class.clone();
                            ui.selectable_value(&mut page.form.student_class, class, label);
                        }
                    });
            });
            ui.add_space(8.0);
        }

        ui.add_space(12.0);
        if ui.add_enabled(!page.status.loading, styles::primary_button("Sign Up")).clicked() {
            page.submit(cx);
        }

        ui.add_space(10.0);
        if ui.link("Already registered? Log in").clicked() {
            cx.navigate(Route::Login);
        }

        if page.status.loading {
            ui.add_space(15.0);
            ui.spinner();
        }
    });
}
