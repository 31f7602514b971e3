fn main() {
    ik_ninja::game::run();
}
