//! PHP sources shared by several test modules.

/// `User` with one public method and one private property.
pub const USER_CLASS: &str = "<?php
class User {
    private $secret;

    /**
     * Display name of the user.
     *
     * @return string
     */
    public function getName() {

    }
}";

/// Subclass of `User`, cursor on line 3.
pub const ADMIN_CLASS: &str = "<?php
class Admin extends User {
    public function promote() {

    }
}";

/// Base class declaring a protected property.
pub const BASE_CLASS: &str = "<?php
class A {
    protected $value;
    private $hidden;
    public function describe($verbose) {}
}";

/// Subclass of `A` declaring nothing of its own.
pub const CHILD_CLASS: &str = "<?php
class B extends A {
    public function run() {

    }
}";

/// Method with parameters, locals and a try/catch.
pub const SCOPED_METHOD: &str = "<?php
class Report {
    public function build($rows, $title) {
        $total = 0;
        foreach ($rows as $row) {
            $total += $row;

        }
        try {
            $file = open($title);

        } catch (Exception $e) {
            $message = $e;

        }
        $late = 1;
    }
}";
