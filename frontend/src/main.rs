fn main() {
    hr_portal_frontend::start();
}
