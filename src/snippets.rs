//! Reference snippets shown in the code pane
//!
//! Each [`SnippetKey`] maps to a fixed JavaScript (or rules language) sample that
//! illustrates the backend call the active panel is demonstrating.

/// Closed set of snippet topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnippetKey {
    Init,
    Register,
    Login,
    AuthState,
    SignOut,
    AddDoc,
    GetDocs,
    UpdateDoc,
    DeleteDoc,
    OnSnapshot,
    RulesInsecure,
    RulesSecure,
}

impl SnippetKey {
    pub const ALL: [SnippetKey; 12] = [
        SnippetKey::Init,
        SnippetKey::Register,
        SnippetKey::Login,
        SnippetKey::AuthState,
        SnippetKey::SignOut,
        SnippetKey::AddDoc,
        SnippetKey::GetDocs,
        SnippetKey::UpdateDoc,
        SnippetKey::DeleteDoc,
        SnippetKey::OnSnapshot,
        SnippetKey::RulesInsecure,
        SnippetKey::RulesSecure,
    ];

    /// File name displayed in the code pane header
    pub fn filename(self) -> &'static str {
        match self {
            SnippetKey::RulesInsecure | SnippetKey::RulesSecure => "firestore.rules",
            _ => "app.js",
        }
    }
}

/// Look up the snippet text for a topic
pub fn snippet(key: SnippetKey) -> &'static str {
    match key {
        SnippetKey::Init => INIT,
        SnippetKey::Register => REGISTER,
        SnippetKey::Login => LOGIN,
        SnippetKey::AuthState => AUTH_STATE,
        SnippetKey::SignOut => SIGN_OUT,
        SnippetKey::AddDoc => ADD_DOC,
        SnippetKey::GetDocs => GET_DOCS,
        SnippetKey::UpdateDoc => UPDATE_DOC,
        SnippetKey::DeleteDoc => DELETE_DOC,
        SnippetKey::OnSnapshot => ON_SNAPSHOT,
        SnippetKey::RulesInsecure => RULES_INSECURE,
        SnippetKey::RulesSecure => RULES_SECURE,
    }
}

const INIT: &str = r#"import { initializeApp } from 'firebase/app'
import { getAuth } from 'firebase/auth'
import { getFirestore } from 'firebase/firestore'

const firebaseConfig = {
  apiKey: "AIzaSy...",
  authDomain: "my-project.firebaseapp.com",
  projectId: "my-project",
  storageBucket: "my-project.appspot.com",
  messagingSenderId: "123456789",
  appId: "1:123456789:web:abc"
}

const app = initializeApp(firebaseConfig)
export const auth = getAuth(app)
export const db = getFirestore(app)"#;

const REGISTER: &str = r#"import { createUserWithEmailAndPassword } from 'firebase/auth'

registerButton.addEventListener("click", async () => {
  const email = registerEmailInput.value
  const password = registerPasswordInput.value
  try {
    await createUserWithEmailAndPassword(auth, email, password)
    alert("Account created!")
  } catch (error) {
    alert("Error: " + error.message)
  }
})"#;

const LOGIN: &str = r#"import { signInWithEmailAndPassword } from 'firebase/auth'

loginButton.addEventListener("click", async () => {
  const email = emailInput.value
  const password = passwordInput.value
  try {
    await signInWithEmailAndPassword(auth, email, password)
    statusDiv.innerHTML = "<p>Signed in!</p>"
  } catch (error) {
    statusDiv.innerHTML = "<p>Error: wrong credentials.</p>"
  }
})"#;

const AUTH_STATE: &str = r#"import { onAuthStateChanged } from 'firebase/auth'

onAuthStateChanged(auth, (user) => {
  if (user) {
    loginSection.style.display = "none"
    statusDiv.innerHTML = `Hello, ${user.email}`
  } else {
    loginSection.style.display = "block"
    statusDiv.innerHTML = ""
  }
})"#;

const SIGN_OUT: &str = r#"import { signOut } from 'firebase/auth'

logoutButton.addEventListener("click", async () => {
  try {
    await signOut(auth)
    alert("Signed out.")
  } catch (error) {
    alert("Sign-out failed.")
  }
})"#;

const ADD_DOC: &str = r#"import { collection, addDoc, serverTimestamp } from 'firebase/firestore'

sendButton.addEventListener("click", async () => {
  const text = messageInput.value
  const messages = collection(db, "messages")
  await addDoc(messages, {
    text: text,
    authorEmail: auth.currentUser?.email,
    createdAt: serverTimestamp()
  })
  messageInput.value = ""
})"#;

const GET_DOCS: &str = r#"import { getDocs } from 'firebase/firestore'

async function loadMessages() {
  const messages = collection(db, "messages")
  const results = await getDocs(messages)
  outputDiv.innerHTML = ""
  results.forEach((document) => {
    const data = document.data()
    const p = document.createElement("p")
    p.innerText = data.text
    outputDiv.appendChild(p)
  })
}
loadMessages()"#;

const UPDATE_DOC: &str = r#"import { doc, updateDoc } from 'firebase/firestore'

const messageRef = doc(db, "messages", messageId)
await updateDoc(messageRef, {
  text: "This message was edited"
})"#;

const DELETE_DOC: &str = r#"import { doc, deleteDoc } from 'firebase/firestore'

const messageRef = doc(db, "messages", messageId)
await deleteDoc(messageRef)"#;

const ON_SNAPSHOT: &str = r#"import { onSnapshot, query, orderBy } from 'firebase/firestore'

const q = query(
  collection(db, "messages"),
  orderBy("createdAt", "asc")
)
onSnapshot(q, (snapshot) => {
  outputDiv.innerHTML = ""
  snapshot.forEach((doc) => {
    const data = doc.data()
    outputDiv.innerHTML += `<p>${data.authorEmail}: ${data.text}</p>`
  })
})"#;

const RULES_INSECURE: &str = r#"rules_version = '2'
service cloud.firestore {
  match /databases/{database}/documents {
    match /messages/{document=**} {
      allow read, write: if true
    }
  }
}"#;

const RULES_SECURE: &str = r#"rules_version = '2'
service cloud.firestore {
  match /databases/{database}/documents {
    match /messages/{document=**} {
      allow read, write: if request.auth != null
    }
  }
}"#;
