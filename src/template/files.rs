//! The fixed blueprint of an Express + MongoDB authentication backend.

use crate::error::{Error, Result};
use std::path::{Component, Path};

/// A single generated file: a relative path and its literal content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: &'static str,
    pub content: &'static str,
}

/// Everything kiln materializes, as immutable data.
#[derive(Debug, Clone, Copy)]
pub struct Blueprint {
    /// Subdirectories created under the source root.
    pub folders: &'static [&'static str],
    /// Files relative to the source root, always overwritten.
    pub sources: &'static [TemplateFile],
    /// Files relative to the project root, written only when absent.
    pub root_files: &'static [TemplateFile],
    /// Runtime dependencies passed to the package manager.
    pub dependencies: &'static [&'static str],
    /// Development-only dependencies passed to the package manager.
    pub dev_dependencies: &'static [&'static str],
    /// Manifest script entries this tool owns and always overwrites.
    pub scripts: &'static [(&'static str, &'static str)],
}

pub const FOLDERS: &[&str] =
    &["controllers", "middlewares", "models", "routes", "utils", "config"];

pub const DEPENDENCIES: &[&str] = &[
    "express",
    "dotenv",
    "jsonwebtoken",
    "cors",
    "mongoose",
    "bcryptjs",
    "cookie-parser",
];

pub const DEV_DEPENDENCIES: &[&str] = &["nodemon"];

pub const SCRIPTS: &[(&str, &str)] =
    &[("start", "node src/server.js"), ("dev", "nodemon src/server.js")];

const DB_JS: &str = r#"import mongoose from "mongoose";

const connectDB = async () => {
  try {
    await mongoose.connect(process.env.MONGO_URI);
    console.log("✅ MongoDB Connected Successfully");
  } catch (err) {
    console.error("❌ MongoDB Connection Error:", err);
    process.exit(1);
  }
};

export default connectDB;
"#;

const AUTH_CONTROLLER_JS: &str = r#"import User from "../models/User.js";
import bcrypt from "bcryptjs";
import jwt from "jsonwebtoken";

export const registerUser = async (req, res) => {
  const { name, email, password } = req.body;
  try {
    const userExists = await User.findOne({ email });
    if (userExists) return res.status(400).json({ message: "User already exists" });

    const hashedPassword = await bcrypt.hash(password, 10);
    const newUser = new User({ name, email, password: hashedPassword });
    await newUser.save();

    res.status(201).json({ message: "User registered successfully" });
  } catch (err) {
    res.status(500).json({ message: "Server error", error: err.message });
  }
};

export const loginUser = async (req, res) => {
  const { email, password } = req.body;
  try {
    const user = await User.findOne({ email });
    if (!user) return res.status(400).json({ message: "Invalid credentials" });

    const isMatch = await bcrypt.compare(password, user.password);
    if (!isMatch) return res.status(400).json({ message: "Invalid credentials" });

    const token = jwt.sign({ id: user._id }, process.env.JWT_SECRET, { expiresIn: "1h" });

    res.json({ token, userId: user._id });
  } catch (err) {
    res.status(500).json({ message: "Server error", error: err.message });
  }
};
"#;

const AUTH_ROUTES_JS: &str = r#"import { Router } from "express";
import { registerUser, loginUser } from "../controllers/authController.js";

const router = Router();

router.post("/register", registerUser);
router.post("/login", loginUser);

export default router;
"#;

const APP_JS: &str = r#"import express from "express";
import "dotenv/config";
import cookieParser from "cookie-parser";
import cors from "cors";

import connectDB from "./config/db.js";
import authRoutes from "./routes/authRoutes.js";

const app = express();

connectDB();
app.use(cors());
app.use(express.json());
app.use(cookieParser());

app.get("/", (req, res) => {
  res.json({ status: "ok" });
});

app.use("/api/auth", authRoutes);

export default app;
"#;

const SERVER_JS: &str = r#"import app from "./app.js";

const PORT = process.env.PORT || 4000;

app.listen(PORT, () => {
  console.log(`🚀 Server running on port ${PORT}`);
});
"#;

const ENV: &str = "PORT=4000
MONGO_URI=mongodb://localhost:27017/
JWT_SECRET=your_jwt_secret
";

const GITIGNORE: &str = ".env
node_modules
";

pub const SOURCES: &[TemplateFile] = &[
    TemplateFile { path: "config/db.js", content: DB_JS },
    TemplateFile { path: "controllers/authController.js", content: AUTH_CONTROLLER_JS },
    TemplateFile { path: "routes/authRoutes.js", content: AUTH_ROUTES_JS },
    TemplateFile { path: "app.js", content: APP_JS },
    TemplateFile { path: "server.js", content: SERVER_JS },
];

pub const ROOT_FILES: &[TemplateFile] = &[
    TemplateFile { path: ".gitignore", content: GITIGNORE },
    TemplateFile { path: ".env", content: ENV },
];

impl Default for Blueprint {
    fn default() -> Self {
        Self {
            folders: FOLDERS,
            sources: SOURCES,
            root_files: ROOT_FILES,
            dependencies: DEPENDENCIES,
            dev_dependencies: DEV_DEPENDENCIES,
            scripts: SCRIPTS,
        }
    }
}

impl Blueprint {
    /// Checks that every generated path stays inside the tree kiln creates.
    ///
    /// Source templates must sit directly in the source root or in one of
    /// the folders; root files must sit directly in the project root.
    pub fn validate(&self) -> Result<()> {
        for folder in self.folders {
            ensure_relative(folder)?;
            if Path::new(folder).components().count() != 1 {
                return Err(Error::BlueprintError(format!(
                    "folder '{folder}' must be a single path component"
                )));
            }
        }

        for file in self.sources {
            ensure_relative(file.path)?;
            let parent = Path::new(file.path).parent().and_then(|p| p.to_str()).unwrap_or("");
            if !parent.is_empty() && !self.folders.contains(&parent) {
                return Err(Error::BlueprintError(format!(
                    "'{}' is not inside the source root or a known folder",
                    file.path
                )));
            }
        }

        for file in self.root_files {
            ensure_relative(file.path)?;
            if Path::new(file.path).components().count() != 1 {
                return Err(Error::BlueprintError(format!(
                    "root file '{}' must live directly in the project root",
                    file.path
                )));
            }
        }
        Ok(())
    }
}

fn ensure_relative(path: &str) -> Result<()> {
    let ok = !path.is_empty()
        && Path::new(path).components().all(|c| matches!(c, Component::Normal(_)));
    if ok {
        Ok(())
    } else {
        Err(Error::BlueprintError(format!("'{path}' must be a plain relative path")))
    }
}
